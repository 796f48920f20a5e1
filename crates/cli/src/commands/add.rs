use std::sync::Arc;

use anyhow::{Context, bail};

use catalog_app::{ProductFormController, ProductListController, SubmitOutcome, Ui};
use catalog_products::{Field, ProductType};
use catalog_service::CatalogService;

use crate::AddArgs;

pub async fn add(
    service: Arc<dyn CatalogService>,
    ui: Arc<dyn Ui>,
    list: Arc<ProductListController>,
    args: AddArgs,
) -> anyhow::Result<()> {
    let product_type: ProductType = args
        .product_type
        .parse()
        .with_context(|| format!("unknown product type '{}'", args.product_type))?;

    let form = ProductFormController::new(service, ui, list);
    form.set_type(product_type);
    for (field, value) in field_values(args) {
        if let Some(value) = value {
            form.update_field(field, value)?;
        }
    }

    match form.submit().await {
        SubmitOutcome::Created(_) => Ok(()),
        SubmitOutcome::Invalid(errors) => {
            for (field, message) in errors.iter() {
                match field.hint() {
                    Some(hint) => eprintln!("  {message} ({hint})"),
                    None => eprintln!("  {message}"),
                }
            }
            bail!("product not added: {} invalid field(s)", errors.len())
        }
        SubmitOutcome::Failed(err) => Err(err).context("product not added"),
        SubmitOutcome::AlreadySubmitting => bail!("a submit is already in progress"),
    }
}

fn field_values(args: AddArgs) -> [(Field, Option<String>); 8] {
    [
        (Field::Sku, args.sku),
        (Field::Name, args.name),
        (Field::Price, args.price),
        (Field::SizeMb, args.size),
        (Field::WeightKg, args.weight),
        (Field::HeightCm, args.height),
        (Field::WidthCm, args.width),
        (Field::LengthCm, args.length),
    ]
}
