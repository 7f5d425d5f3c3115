use crate::cli::{ExportArgs, ImportArgs};
use crate::context::CliContext;
use crate::output;
use sprintcal_persistence::LocalFileTransfer;

pub fn handle_export(ctx: &mut CliContext, args: ExportArgs) -> anyhow::Result<()> {
    match args.out_dir {
        Some(dir) => {
            let dir = dir.unwrap_or_else(|| ctx.download_dir());
            let transfer = LocalFileTransfer::new(dir);
            let path = ctx.export_to(&transfer, chrono::Local::now().date_naive())?;
            output::output_success(
                serde_json::json!({
                    "path": path.display().to_string(),
                    "count": ctx.store().len(),
                }),
                ctx.take_notices(),
            );
        }
        None => {
            let text = ctx.export_text()?;
            output::output_notices(ctx.take_notices());
            println!("{}", text);
        }
    }
    Ok(())
}

pub async fn handle_import(ctx: &mut CliContext, args: ImportArgs) -> anyhow::Result<()> {
    ctx.restore_selection(args.selected);
    let transfer = LocalFileTransfer::new(".").with_source(&args.file);
    let outcome = ctx
        .import(&transfer)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to import {}: {}", args.file.display(), e))?;
    output::output_success(&outcome, ctx.take_notices());
    Ok(())
}
