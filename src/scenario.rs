//! The interactive walkthrough.

use crate::error::Result;
use crate::prompt::Prompter;
use crate::seed::SeedLoader;
use crate::table::{RecordTable, TableConfig, TableHandle, admin};

use anstream::println as aprintln;
use aws_sdk_dynamodb::Client;
use rust_decimal::Decimal;
use std::{ops::RangeInclusive, path::PathBuf};

/// Title of a record shipped with the seed data.
pub const KNOWN_TITLE: &str = "Jujutsu Kaisen";
/// Category of [`KNOWN_TITLE`].
pub const KNOWN_CATEGORY: &str = "2018";

/// Years offered by the query and scan steps.
const SEARCH_YEARS: RangeInclusive<i32> = 2010..=2020;
/// Years accepted as a release year.
const RELEASE_YEARS: RangeInclusive<i32> = 1900..=2100;

fn ratings() -> RangeInclusive<Decimal> {
    Decimal::ONE..=Decimal::TEN
}

fn separator() {
    aprintln!("{}", "-".repeat(88));
}

/// Everything the walkthrough needs besides the client and the prompter.
#[derive(Clone, Debug)]
pub struct ScenarioSettings {
    /// Table to use, created with this configuration when missing.
    pub table: TableConfig,
    /// Seed file loaded into a freshly created table.
    pub seed_file: PathBuf,
    /// Loader for the seed file.
    pub seed_loader: SeedLoader,
    /// Items evaluated per scan page.
    pub scan_page_size: Option<i32>,
}

/// Run the walkthrough: create, write, update, seed, read, query, scan, then clean up.
pub async fn run_scenario<P: Prompter>(
    client: &Client,
    settings: &ScenarioSettings,
    prompter: &mut P,
) -> Result<()> {
    separator();
    aprintln!("Welcome to the Amazon DynamoDB anime demo.");
    separator();

    let table_name = settings.table.table_name.as_str();
    let existed = admin::exists(client, table_name).await?;
    let handle = if existed {
        TableHandle {
            name: table_name.to_string(),
            status: None,
        }
    } else {
        aprintln!("\nCreating table {table_name}...");
        let handle = admin::create_table(client, &settings.table).await?;
        aprintln!("\nCreated table {}.", handle.name);
        handle
    };
    let records =
        RecordTable::new(client.clone(), handle).with_scan_page_size(settings.scan_page_size);

    let title = prompter.text("Enter the title of an anime you would like to add")?;
    let category = prompter
        .integer("Which category (release year) does it belong to", RELEASE_YEARS)?
        .to_string();
    let rating = prompter.decimal("On a scale of 1 - 10, how do you rate it", ratings())?;
    let year = prompter.integer("What year was it released", RELEASE_YEARS)?;
    records.put_record(&title, &category, year, rating).await?;
    aprintln!("\nAdded '{title}' to '{}'.", records.name());
    separator();

    let new_rating = prompter.decimal(
        &format!("Let's update it. You rated it {rating}, what rating would you give it now"),
        ratings(),
    )?;
    let updated = records
        .update_record(&title, &category, new_rating, year)
        .await?;
    aprintln!("\nUpdated '{title}' with new attributes:");
    aprintln!("\tyear: {}", display_or_dash(updated.year));
    aprintln!("\trating: {}", display_or_dash(updated.rating));
    separator();

    if !existed {
        let seed = settings.seed_loader.load(&settings.seed_file).await?;
        aprintln!(
            "\nReading data from '{}' into your table.",
            settings.seed_file.display()
        );
        records.write_batch(&seed).await?;
        aprintln!("\nWrote {} animes into {}.", seed.len(), records.name());
        separator();
    }

    if prompter.confirm(&format!(
        "Would you like to get the info for '{KNOWN_TITLE}'?"
    ))? {
        match records.get_record(KNOWN_TITLE, KNOWN_CATEGORY).await? {
            Some(record) => aprintln!("\nHere's what I found:\n\t{record}"),
            None => aprintln!("\n'{KNOWN_TITLE}' is not in the table."),
        }
    }
    separator();

    loop {
        let release_year = prompter.integer(
            "Let's list the animes released in a given year. Pick a year",
            SEARCH_YEARS,
        )?;
        let releases = records
            .query_by_category(&release_year.to_string())
            .await?;
        if !releases.is_empty() {
            aprintln!(
                "There were {} animes released in {release_year}:",
                releases.len()
            );
            for release in &releases {
                aprintln!("\t{}", release.title);
            }
            break;
        }
        aprintln!("I don't know about any animes released in {release_year}!");
        if !prompter.confirm("Would you like to try another year?")? {
            break;
        }
    }
    separator();

    let first = prompter.integer(
        "Now let's scan for animes released in a range of years. Enter a year",
        SEARCH_YEARS,
    )?;
    let second = prompter.integer("Enter another year", SEARCH_YEARS)?;
    let (low, high) = (first.min(second), first.max(second));
    let releases = records
        .scan_by_category_range(&low.to_string(), &high.to_string())
        .await?;
    if releases.is_empty() {
        aprintln!("I don't know about any animes released between {low} and {high}.");
    } else {
        let found = i32::try_from(releases.len()).unwrap_or(i32::MAX);
        let count = prompter.integer(
            &format!("Found {found} animes. How many do you want to see?"),
            1..=found,
        )?;
        aprintln!("\nHere are your {count} animes:\n");
        for release in releases.iter().take(usize::try_from(count).unwrap_or(0)) {
            aprintln!("\t{release}");
        }
    }
    separator();

    if prompter.confirm(&format!("Let's remove an anime. Do you want to remove '{title}'?"))? {
        records.delete_record(&title, &category).await?;
        aprintln!("\nRemoved '{title}' from the table.");
    }
    separator();

    if prompter.confirm("Do you want to delete the table?")? {
        records.delete_table().await?;
        aprintln!("Deleted {table_name}.");
    } else {
        aprintln!(
            "Don't forget to delete the table when you're done or you might incur charges on your account."
        );
    }
    aprintln!("\nThanks for watching!");
    separator();
    Ok(())
}

fn display_or_dash<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| "-".to_string(), |value| value.to_string())
}
