//! Resource commands: browse, upload, edit, download, save, rate.

use crate::cli::{ResourceAction, ResourcesArgs};
use crate::error::{CliError, Result};
use crate::output::Formatter;
use edushare_domain::ResourceId;
use edushare_sdk::{EduShareClient, ResourceQuery, ResourceUpdate, ResourceUpload};
use std::fs;
use std::path::Path;

/// Execute a resources subcommand.
pub async fn execute_resources(
    args: ResourcesArgs,
    client: &EduShareClient,
    formatter: &Formatter,
) -> Result<()> {
    match args.action {
        ResourceAction::List(list) => {
            let query = ResourceQuery {
                search: list.search,
                subject: list.subject,
                grade_level: list.grade_level,
                resource_type: list.resource_type,
            };
            let resources = client.list_resources(&query).await?;
            println!("{}", formatter.format_resources(&resources)?);
        }

        ResourceAction::Show(arg) => {
            let resource = client.get_resource(ResourceId::new(arg.resource_id)).await?;
            println!("{}", formatter.format_resource(&resource)?);
        }

        ResourceAction::Upload(upload) => {
            let path = Path::new(&upload.file);
            let file_name = path
                .file_name()
                .and_then(|n| n.to_str())
                .ok_or_else(|| CliError::InvalidInput(format!("Invalid file path: {}", upload.file)))?
                .to_string();
            let file_bytes = fs::read(path)?;

            let resource = client
                .upload_resource(ResourceUpload {
                    title: upload.title,
                    description: upload.description,
                    resource_type: upload.resource_type,
                    subject: upload.subject,
                    grade_level: upload.grade_level,
                    file_name,
                    file_bytes,
                })
                .await?;
            println!(
                "{}",
                formatter.success(&format!("Uploaded '{}' (id {})", resource.title, resource.id))
            );
        }

        ResourceAction::Edit(edit) => {
            let update = ResourceUpdate {
                title: edit.title,
                description: edit.description,
                resource_type: edit.resource_type,
                subject: edit.subject,
                grade_level: edit.grade_level,
            };
            let resource = client
                .update_resource(ResourceId::new(edit.resource_id), &update)
                .await?;
            println!("{}", formatter.success(&format!("Updated '{}'", resource.title)));
        }

        ResourceAction::Delete(arg) => {
            client.delete_resource(ResourceId::new(arg.resource_id)).await?;
            println!(
                "{}",
                formatter.success(&format!("Resource {} deleted", arg.resource_id))
            );
        }

        ResourceAction::Download(arg) => {
            let link = client
                .download_resource(ResourceId::new(arg.resource_id))
                .await?;
            println!("{}", formatter.success("Download recorded"));
            println!("{}", link.download_url);
        }

        ResourceAction::Save(arg) => {
            client.save_resource(ResourceId::new(arg.resource_id)).await?;
            println!(
                "{}",
                formatter.success(&format!("Resource {} saved", arg.resource_id))
            );
        }

        ResourceAction::Unsave(arg) => {
            client.unsave_resource(ResourceId::new(arg.resource_id)).await?;
            println!(
                "{}",
                formatter.success(&format!("Resource {} unsaved", arg.resource_id))
            );
        }

        ResourceAction::Rate(rate) => {
            if !(1..=5).contains(&rate.rating) {
                return Err(CliError::InvalidInput(
                    "Rating must be between 1 and 5".to_string(),
                ));
            }
            let rating = client
                .rate_resource(
                    ResourceId::new(rate.resource_id),
                    rate.rating,
                    rate.comment.as_deref(),
                )
                .await?;
            println!(
                "{}",
                formatter.success(&format!(
                    "Rated '{}' {} star(s)",
                    rating.resource_title, rating.rating
                ))
            );
        }

        ResourceAction::Ratings(arg) => {
            let ratings = client
                .resource_ratings(ResourceId::new(arg.resource_id))
                .await?;
            println!("{}", formatter.format_ratings(&ratings)?);
        }
    }
    Ok(())
}
