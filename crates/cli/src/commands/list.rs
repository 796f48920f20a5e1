use catalog_app::ProductListController;
use catalog_products::Product;

pub async fn list(controller: &ProductListController) -> anyhow::Result<()> {
    controller.mount().await;
    let snapshot = controller.snapshot();
    controller.unmount();

    if let Some(failure) = &snapshot.last_failure {
        eprintln!("warning: could not load products ({failure})");
    }
    if snapshot.products.is_empty() {
        println!("No products.");
        return Ok(());
    }

    println!("{:<6} {:<12} {:<24} {:>10}  {:<10} ATTRIBUTES", "ID", "SKU", "NAME", "PRICE", "TYPE");
    for product in &snapshot.products {
        println!("{}", render(product));
    }
    Ok(())
}

fn render(product: &Product) -> String {
    format!(
        "{:<6} {:<12} {:<24} {:>10}  {:<10} {}",
        product.id.to_string(),
        product.sku,
        product.name,
        format!("{} $", product.price),
        product.product_type().as_str(),
        product.attributes.describe(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_core::ProductId;
    use catalog_products::VariantAttributes;
    use rust_decimal::Decimal;

    #[test]
    fn row_shows_variant_attributes() {
        let product = Product {
            id: ProductId::from(7u64),
            sku: "JVC200123".to_string(),
            name: "Acme DISC".to_string(),
            price: Decimal::new(100, 2),
            attributes: VariantAttributes::Dvd { size_mb: Decimal::from(700) },
        };

        let row = render(&product);

        assert!(row.starts_with("7 "));
        assert!(row.contains("1.00 $"));
        assert!(row.contains("DVD"));
        assert!(row.ends_with("Size: 700 MB"));
    }
}
