use arbor_inspect::{capture, classifier, cli, config, error, export, location, mail, map, risk, store};
use clap::Parser;
use cli::{Cli, Commands, ExportFormat};
use config::Config;
use error::{ArborError, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use store::InspectionStore;

#[tokio::main]
async fn main() {
    // every external-collaborator failure surfaces here as a notice; the
    // store is never left with a partial record
    if let Err(e) = run().await {
        eprintln!("✗ {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Inspect { images, folder, lat, lon } => {
            println!("🌲 arbor-inspect - inspection\n");

            let mut store = InspectionStore::open(&cli.db)?;

            let sources = match folder {
                Some(folder) => {
                    println!("[1/3] Scanning {}...", folder.display());
                    capture::collect_from_folder(&folder)?
                }
                None => images,
            };
            let staged = capture::stage_images(&sources, &store.images_dir(), config.max_images)?;
            println!("✔ {} image(s) staged", staged.len());

            let geo = location::Geo::from_args(lat, lon);
            let gps_text = geo.storage_text();
            println!("📍 Coordinates: {}\n", gps_text);

            println!("[2/3] AI analysis...");
            let spinner = ProgressBar::new_spinner();
            spinner.set_style(
                ProgressStyle::with_template("{spinner} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner()),
            );
            spinner.set_message("analyzing biomechanics and pathologies...");
            spinner.enable_steady_tick(Duration::from_millis(100));

            let classifier = classifier::Classifier::new(
                config.get_api_key()?,
                config.model.clone(),
                config.timeout_seconds,
            )?;
            let analysis = match classifier.analyze(&staged).await {
                Ok(text) => text,
                Err(e) => {
                    spinner.finish_and_clear();
                    // no record on classifier failure; drop the staged copies
                    for path in &staged {
                        let _ = std::fs::remove_file(path);
                    }
                    return Err(e);
                }
            };
            spinner.finish_and_clear();
            println!("✔ Analysis complete\n");

            let risk = risk::derive_risk(&analysis);
            let timestamp = chrono::Local::now().format("%d/%m/%Y %H:%M").to_string();

            println!("[3/3] Saving record...");
            let id = store.insert(&timestamp, &analysis, &staged, &gps_text, risk)?;
            println!("✔ Record #{} saved (risk: {})\n", id, risk);

            println!("{}", analysis);
        }

        Commands::List => {
            let store = InspectionStore::open(&cli.db)?;
            let records = store.list_all()?;
            println!("🗄️  Technical inventory: {} record(s)\n", records.len());

            for r in &records {
                println!("📌 #{} | {} | Risk: {} | 📍 {}", r.id, r.timestamp, r.risk, r.location);
                if !r.image_paths.is_empty() {
                    println!("   images: {}", r.image_paths.join(", "));
                }
                if cli.verbose {
                    for line in r.analysis.lines() {
                        println!("   {}", line);
                    }
                } else {
                    let preview: String = r.analysis.chars().take(120).collect();
                    println!("   {}", preview);
                }
                println!();
            }
        }

        Commands::Map { output } => {
            let store = InspectionStore::open(&cli.db)?;
            let records = store.list_all()?;
            let points = map::map_points(&records);
            let json = serde_json::to_string_pretty(&points)?;

            match output {
                Some(path) => {
                    std::fs::write(&path, json)?;
                    println!("✔ Map data: {} point(s) → {}", points.len(), path.display());
                }
                None => println!("{}", json),
            }

            if cli.verbose && points.len() < records.len() {
                println!(
                    "({} record(s) without valid GPS excluded)",
                    records.len() - points.len()
                );
            }
        }

        Commands::Export { format, id, output, title } => {
            println!("📄 arbor-inspect - export\n");
            let store = InspectionStore::open(&cli.db)?;

            match format {
                ExportFormat::Csv => {
                    let records = store.list_all()?;
                    let output_dir = output.unwrap_or_else(|| std::path::PathBuf::from("."));
                    let path = export::csv::export_csv(&records, &output_dir)?;
                    println!("✔ CSV ({} record(s)): {}", records.len(), path.display());
                }
                ExportFormat::Pdf => {
                    let id = id.ok_or_else(|| {
                        ArborError::Config("--id is required for pdf export".into())
                    })?;
                    let record = store.get(id)?.ok_or(ArborError::RecordNotFound(id))?;
                    let output_path = output
                        .unwrap_or_else(|| export::pdf::report_file_name(id).into());
                    export::pdf::generate_pdf(&record, &output_path, &title)?;
                    println!("✔ PDF: {}", output_path.display());
                }
            }
        }

        Commands::Email { id, to, smtp_user, smtp_host, subject } => {
            println!("📧 arbor-inspect - email report\n");
            let store = InspectionStore::open(&cli.db)?;
            let record = store.get(id)?.ok_or(ArborError::RecordNotFound(id))?;

            let user = smtp_user
                .or_else(|| config.smtp_user.clone())
                .ok_or_else(|| {
                    ArborError::Config("no SMTP account: pass --smtp-user or configure one".into())
                })?;
            let password = std::env::var("SMTP_PASSWORD").map_err(|_| {
                ArborError::Config("SMTP password not set; export SMTP_PASSWORD".into())
            })?;
            let account = mail::MailAccount {
                smtp_host: smtp_host.unwrap_or_else(|| config.smtp_host.clone()),
                user,
                password,
            };

            println!("[1/2] Generating report...");
            let pdf_path = std::path::PathBuf::from(export::pdf::report_file_name(id));
            export::pdf::generate_pdf(&record, &pdf_path, "Tree Inspection Report")?;
            println!("✔ PDF: {}", pdf_path.display());

            println!("[2/2] Sending to {}...", to);
            let subject = subject.unwrap_or_else(|| format!("Inspection report #{}", id));
            let body = format!(
                "Inspection report #{} attached.\nDate: {}\nRisk: {}\nLocation: {}",
                record.id, record.timestamp, record.risk, record.location
            );
            mail::send_report(&account, &to, &subject, &body, &pdf_path)?;
            println!("✔ Sent");
        }

        Commands::Delete { id } => {
            let mut store = InspectionStore::open(&cli.db)?;
            let existed = store.get(id)?.is_some();
            let orphaned = store.delete_by_id(id)?;
            if existed {
                println!("🗑️  Record #{} deleted", id);
            } else {
                println!("Record #{} not present (nothing deleted)", id);
            }
            // staged copies are removed best-effort once the delete commits
            for path in orphaned {
                let _ = std::fs::remove_file(&path);
            }
        }

        Commands::Config { set_api_key, show } => {
            let mut config = config;

            if let Some(key) = set_api_key {
                config.set_api_key(key)?;
                println!("✔ API key saved");
            }

            if show {
                println!("Settings:");
                println!("  model: {}", config.model);
                println!("  max images per request: {}", config.max_images);
                println!("  timeout: {}s", config.timeout_seconds);
                println!("  SMTP host: {}", config.smtp_host);
                println!("  SMTP user: {}", config.smtp_user.as_deref().unwrap_or("unset"));
                println!("  API key: {}", if config.api_key.is_some() { "saved" } else { "unset" });
            }
        }
    }

    Ok(())
}
