use std::{env::current_dir, fs::write, path::PathBuf};

use anyhow::{bail, Context, Result};
use chrono::Datelike;
use clap::Parser;
use kwc_core::{aggregate, calendar_file, street_client, waste_type::WasteTypeBitmask};

#[derive(Debug, Parser)]
pub struct Arguments {
    /// the street as named in the street index
    pub street: String,
    /// the house number
    pub house_number: String,
    /// base URL of the host publishing the street data files
    #[arg(long, default_value = "https://odbior.zayats.pl")]
    pub base_url: String,
    /// the schedule year
    #[arg(long, default_value_t = chrono::Local::now().year())]
    pub year: i32,
    /// where to write the calendar file (defaults to the suggested name in
    /// the current directory)
    #[arg(long)]
    pub output: Option<PathBuf>,
    /// exclude mixed waste collection dates
    #[arg(long)]
    pub exclude_mixed: bool,
    /// exclude paper waste collection dates
    #[arg(long)]
    pub exclude_paper: bool,
    /// exclude plastic waste collection dates
    #[arg(long)]
    pub exclude_plastic: bool,
    /// exclude glass waste collection dates
    #[arg(long)]
    pub exclude_glass: bool,
    /// exclude bio waste collection dates
    #[arg(long)]
    pub exclude_bio: bool,
    /// exclude barrel waste collection dates
    #[arg(long)]
    pub exclude_barrel: bool,
}

impl From<&Arguments> for WasteTypeBitmask {
    fn from(value: &Arguments) -> Self {
        let mut waste_type_bitmask = WasteTypeBitmask::none();
        if value.exclude_mixed {
            waste_type_bitmask |= WasteTypeBitmask::Mixed;
        }
        if value.exclude_paper {
            waste_type_bitmask |= WasteTypeBitmask::Paper;
        }
        if value.exclude_plastic {
            waste_type_bitmask |= WasteTypeBitmask::Plastic;
        }
        if value.exclude_glass {
            waste_type_bitmask |= WasteTypeBitmask::Glass;
        }
        if value.exclude_bio {
            waste_type_bitmask |= WasteTypeBitmask::Bio;
        }
        if value.exclude_barrel {
            waste_type_bitmask |= WasteTypeBitmask::Barrel;
        }
        waste_type_bitmask
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Arguments::parse();
    let index = street_client::fetch_street_index(&args.base_url, args.year).await?;
    let Some(&file_index) = index.get(&args.street) else {
        bail!(
            "street {:?} is not in the {} street index",
            args.street,
            args.year
        );
    };
    let schedules =
        street_client::fetch_street_schedules(&args.base_url, args.year, file_index).await?;
    let Some(schedule) = schedules
        .into_iter()
        .find(|schedule| schedule.house_number == args.house_number)
    else {
        bail!(
            "house number {:?} has no schedule on {:?}",
            args.house_number,
            args.street
        );
    };
    let mut aggregated = aggregate::aggregate(&schedule);
    let excluded = WasteTypeBitmask::from(&args);
    aggregated
        .events
        .retain(|event| !excluded.contains(WasteTypeBitmask::from(event.waste_type)));
    let payload = calendar_file::encode_calendar(&aggregated.events, None)?;
    let path = match args.output {
        Some(path) => path,
        None => {
            let mut path = current_dir()?;
            path.push(calendar_file::calendar_file_name(
                args.year,
                file_index,
                &schedule.id,
            ));
            path
        }
    };
    write(&path, payload).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}
