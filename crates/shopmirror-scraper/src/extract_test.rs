use super::*;
use shopmirror_core::SelectorConfig;

fn full_selectors() -> CompiledSelectors {
    CompiledSelectors::compile(&SelectorConfig {
        product_block: ".product-card".to_owned(),
        product_link: "a".to_owned(),
        product_name: ".product-title".to_owned(),
        product_description: Some(".prose".to_owned()),
        image_gallery: ".gallery".to_owned(),
        size_options: Some(".size-picker input[type='radio']".to_owned()),
        size_value_attr: "value".to_owned(),
        price: ".sale-price".to_owned(),
    })
    .unwrap()
}

const PRODUCT_PAGE: &str = r#"
<html><body>
  <h1 class="product-title"> Varsity Jacket </h1>
  <div class="prose">Heavyweight wool blend.</div>
  <div class="prose">Made in Portugal.</div>
  <div class="gallery">
    <img src="//cdn.example.com/front.jpg">
    <img src="https://cdn.example.com/back.jpg">
    <img src="https://cdn.example.com/front.jpg">
  </div>
  <div class="size-picker">
    <input type="radio" id="size-s" value="S">
    <label for="size-s">S</label>
    <input type="radio" id="size-m" value="M">
    <label for="size-m" class="swatch is-disabled">M</label>
    <input type="radio" id="size-l" value="L">
  </div>
  <span class="sale-price">Sale price€89,00</span>
</body></html>
"#;

#[test]
fn extracts_name_trimmed() {
    let product = extract_product(PRODUCT_PAGE, &full_selectors(), "https://x/p");
    assert_eq!(product.name.as_deref(), Some("Varsity Jacket"));
}

#[test]
fn description_joins_all_matches_in_order() {
    let product = extract_product(PRODUCT_PAGE, &full_selectors(), "https://x/p");
    assert_eq!(
        product.description,
        "Heavyweight wool blend. Made in Portugal."
    );
}

#[test]
fn images_keep_order_and_duplicates_and_rewrite_protocol_relative() {
    let product = extract_product(PRODUCT_PAGE, &full_selectors(), "https://x/p");
    assert_eq!(
        product.images,
        vec![
            "https://cdn.example.com/front.jpg",
            "https://cdn.example.com/back.jpg",
            "https://cdn.example.com/front.jpg",
        ]
    );
}

#[test]
fn sizes_read_availability_from_labels() {
    let product = extract_product(PRODUCT_PAGE, &full_selectors(), "https://x/p");
    assert_eq!(product.sizes.len(), 3);
    assert!(product.sizes["S"]);
    assert!(!product.sizes["M"]);
    // No label at all: treated as available.
    assert!(product.sizes["L"]);
}

#[test]
fn price_runs_through_the_normalizer() {
    let product = extract_product(PRODUCT_PAGE, &full_selectors(), "https://x/p");
    assert_eq!(product.price, Price::Cents(8900));
}

#[test]
fn url_and_new_flag_are_set() {
    let product = extract_product(PRODUCT_PAGE, &full_selectors(), "https://x/p");
    assert_eq!(product.url, "https://x/p");
    assert!(!product.new);
}

#[test]
fn missing_name_yields_none() {
    let html = "<html><body><span class=\"sale-price\">1,00</span></body></html>";
    let product = extract_product(html, &full_selectors(), "https://x/p");
    assert!(product.name.is_none());
}

#[test]
fn empty_name_element_yields_none() {
    let html = "<html><body><h1 class=\"product-title\">   </h1></body></html>";
    let product = extract_product(html, &full_selectors(), "https://x/p");
    assert!(product.name.is_none());
}

#[test]
fn missing_price_element_is_unavailable() {
    let html = "<html><body><h1 class=\"product-title\">Jacket</h1></body></html>";
    let product = extract_product(html, &full_selectors(), "https://x/p");
    assert_eq!(product.price, Price::Unavailable);
}

#[test]
fn unparseable_price_text_is_unavailable() {
    let html = r#"<html><body>
        <h1 class="product-title">Jacket</h1>
        <span class="sale-price">Sold out</span>
    </body></html>"#;
    let product = extract_product(html, &full_selectors(), "https://x/p");
    assert_eq!(product.price, Price::Unavailable);
}

#[test]
fn optional_selectors_absent_mean_empty_fields() {
    let selectors = CompiledSelectors::compile(&SelectorConfig {
        product_block: ".product-card".to_owned(),
        product_link: "a".to_owned(),
        product_name: ".product-title".to_owned(),
        product_description: None,
        image_gallery: ".gallery".to_owned(),
        size_options: None,
        size_value_attr: "value".to_owned(),
        price: ".sale-price".to_owned(),
    })
    .unwrap();

    let product = extract_product(PRODUCT_PAGE, &selectors, "https://x/p");
    assert_eq!(product.description, "");
    assert!(product.sizes.is_empty());
}

#[test]
fn size_input_without_value_attribute_is_skipped() {
    let html = r#"<html><body>
        <div class="size-picker">
          <input type="radio" id="size-s">
          <label for="size-s">S</label>
        </div>
    </body></html>"#;
    let product = extract_product(html, &full_selectors(), "https://x/p");
    assert!(product.sizes.is_empty());
}

#[test]
fn images_without_src_are_skipped() {
    let html = r#"<html><body>
        <div class="gallery"><img><img src=""></div>
    </body></html>"#;
    let product = extract_product(html, &full_selectors(), "https://x/p");
    assert!(product.images.is_empty());
}

#[test]
fn garbage_html_still_yields_a_record() {
    // html5ever recovers from arbitrary input; the record is simply empty.
    let product = extract_product("<<<not html>>>", &full_selectors(), "https://x/p");
    assert!(product.name.is_none());
    assert!(product.images.is_empty());
    assert_eq!(product.price, Price::Unavailable);
}
