use crate::currency::encode_from_cents;
use crate::dates::format_display_date;
use crate::models::Product;

/// Renders a product for the "view" menu option.
pub fn format_product(position: u64, product: &Product) -> String {
    format!(
        "Item ID {position}:\n{}\nIn stock:\t\t{}\nPrice:\t\t\t{}\nRecord last updated:\t{}",
        product.name,
        product.quantity,
        encode_from_cents(product.price_cents),
        format_display_date(&product.updated_at)
    )
}
