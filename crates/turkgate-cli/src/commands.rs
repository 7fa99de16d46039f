use anyhow::Result;

use crate::cli::Commands;
use turkgate_manager::TurkGateManager;

pub async fn execute(command: Commands, manager: &TurkGateManager) -> Result<()> {
    match command {
        Commands::Init => {
            manager.init_schema().await?;
            println!("✓ SurveyRequest table ready");
        }

        Commands::Groups => {
            let groups = manager.get_groups().await?;
            if groups.is_empty() {
                println!("No groups");
            }
            for group in groups {
                println!("{}", group);
            }
        }

        Commands::Workers { group } => {
            let workers = match group {
                Some(group) => manager.get_workers_by_group(&group).await?,
                None => manager.get_workers().await?,
            };
            for worker in workers {
                println!("{}", worker);
            }
        }

        Commands::Requests { group } => {
            let requests = manager.get_requests_by_group(&group).await?;
            println!("{} request(s) in group '{}'", requests.len(), group);
            for request in requests {
                println!(
                    "  #{} worker={} url={} time={}",
                    request.request_id,
                    request.worker_id,
                    request.url.as_deref().unwrap_or("-"),
                    request
                        .time
                        .map(|t| t.to_rfc3339())
                        .unwrap_or_else(|| "-".to_string()),
                );
            }
        }

        Commands::Remove { group } => {
            let removed = manager.remove_requests_by_group(&group).await?;
            println!("✓ Removed {} request(s) from group '{}'", removed, group);
        }

        Commands::Copy { from, to } => {
            manager.copy_group(&from, &to).await?;
            println!("✓ Copied group '{}' to '{}'", from, to);
        }

        Commands::Rename { from, to } => {
            manager.rename_group(&from, &to).await?;
            println!("✓ Renamed group '{}' to '{}'", from, to);
        }

        Commands::Titles { recent, pages } => {
            let titles = manager.get_recent_hit_titles(recent, pages).await?;
            for title in titles {
                println!("{}", title);
            }
        }

        Commands::Sync {
            title,
            group,
            url,
            no_time,
        } => {
            println!("Fetching assignments for HIT '{}'...", title);
            let requests = manager
                .make_requests_from_hit_title(&title, &group, url.as_deref(), !no_time)
                .await?;

            if requests.is_empty() {
                println!("No assignments found");
                return Ok(());
            }

            manager.add_requests(&requests).await?;
            println!("✓ Added {} request(s) to group '{}'", requests.len(), group);
        }

        Commands::Import {
            file,
            group,
            url,
            id_col,
            time_col,
        } => {
            let requests = manager.make_requests_from_csv(
                &file,
                &group,
                url.as_deref(),
                &id_col,
                &time_col,
            )?;

            if requests.is_empty() {
                println!("No rows in {}", file.display());
                return Ok(());
            }

            manager.add_requests(&requests).await?;
            println!("✓ Imported {} request(s) into group '{}'", requests.len(), group);
        }
    }

    Ok(())
}
