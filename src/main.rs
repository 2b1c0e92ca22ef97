use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use whether_core::{AppError, Config, RenderFormat};
use whether_forecast::{CitySource, ForecastClient};
use whether_ui::{ControllerError, ForecastController, ForecastView, RequestOutcome};

#[derive(Parser, Debug)]
#[command(author, version, about = "Seven-day forecast for a city from the coordinate table", long_about = None)]
struct Cli {
    /// Config file to use instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the cities that can be selected
    Cities,
    /// Fetch and show the forecast strip for a city
    Forecast(ForecastArgs),
}

#[derive(Args, Debug, Default)]
struct ForecastArgs {
    /// City name, "City, Country" label, or index from `cities`
    #[arg(long)]
    city: Option<String>,

    /// Print the strip as an HTML fragment
    #[arg(long)]
    html: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    whether_core::init()?;

    let cli = Cli::parse();
    let (config, _) = Config::load_validated(cli.config.as_deref())?;

    let source = CitySource::from(config.services.cities_source.as_str());
    let client = ForecastClient::new(&config.services.forecast_api_url)?;
    let view = ForecastView::shared(config.render.image_dir.clone());
    let controller = ForecastController::init(&source, client, view).await;

    match cli.command {
        Command::Cities => {
            for (index, city) in controller.cities().iter().enumerate() {
                println!("{:>3}  {:<32} {}", index, city.option_label(), city.option_value());
            }
            Ok(())
        }
        Command::Forecast(args) => {
            let html = args.html || config.render.format == RenderFormat::Html;
            forecast(&controller, args.city.as_deref(), html).await
        }
    }
}

async fn forecast(controller: &ForecastController, city: Option<&str>, html: bool) -> Result<()> {
    if let Some(query) = city {
        let selected = match query.trim().parse::<usize>() {
            Ok(index) => controller.select(index),
            Err(_) => controller.select_by_name(query),
        };
        if let Err(e) = selected {
            let e = AppError::from(ControllerError::from(e));
            tracing::warn!("{}", e);
            eprintln!("{}", e.user_message());
            return Ok(());
        }
    }

    match controller.request_forecast().await {
        Ok(RequestOutcome::Superseded { generation }) => {
            tracing::debug!("Forecast #{} superseded", generation);
        }
        Ok(_) => {
            let view = controller.view();
            let view = view.lock();
            if html {
                print!("{}", view.to_html());
            } else {
                print!("{}", &*view);
            }
        }
        Err(e) => {
            let e = AppError::from(e);
            tracing::warn!("{}", e);
            eprintln!("{}", e.user_message());
        }
    }

    Ok(())
}
