use anyhow::bail;

use catalog_app::{DeleteOutcome, ListSnapshot, ProductListController};
use catalog_core::ProductId;

pub async fn delete(list: &ProductListController, id: &str) -> anyhow::Result<()> {
    list.mount().await;
    let id = resolve(&list.snapshot(), id)?;
    let outcome = list.delete_one(id).await;
    list.unmount();
    report(outcome)
}

pub async fn mass_delete(list: &ProductListController, ids: &[String]) -> anyhow::Result<()> {
    list.mount().await;
    let snapshot = list.snapshot();
    for raw in ids {
        let id = resolve(&snapshot, raw)?;
        if !list.is_selected(&id) {
            list.toggle_select(&id);
        }
    }
    let outcome = list.delete_selected().await;
    list.unmount();
    report(outcome)
}

/// Match a command-line id against the listed products, keeping the wire form.
fn resolve(snapshot: &ListSnapshot, raw: &str) -> anyhow::Result<ProductId> {
    let raw = raw.trim();
    if let Some(product) = snapshot.products.iter().find(|p| p.id.to_string() == raw) {
        return Ok(product.id.clone());
    }
    match &snapshot.last_failure {
        Some(failure) => bail!("could not load products ({failure}); cannot resolve id '{raw}'"),
        None => bail!("no product with id '{raw}'"),
    }
}

fn report(outcome: DeleteOutcome) -> anyhow::Result<()> {
    match outcome {
        DeleteOutcome::Deleted(count) => {
            println!("Deleted {count} product(s).");
            Ok(())
        }
        DeleteOutcome::Cancelled => {
            println!("Nothing deleted.");
            Ok(())
        }
        DeleteOutcome::NothingSelected => Ok(()),
        DeleteOutcome::Failed(err) => Err(anyhow::Error::new(err).context("delete failed")),
    }
}
