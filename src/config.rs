//! Command line and environment settings, and the DynamoDB client factory.

use aws_sdk_dynamodb::Client;
use std::path::PathBuf;

/// Default location of the public sample archive used to seed a new table.
pub const DEFAULT_SEED_ARCHIVE_URL: &str =
    "https://docs.aws.amazon.com/amazondynamodb/latest/developerguide/samples/moviedata.zip";

/// Walk through the DynamoDB table API with an anime record table.
#[derive(Clone, Debug, clap::Parser)]
#[command(version, long_about = "Walk through the DynamoDB table API with an anime record table.

Creates the table when it is missing, writes and updates a record of your
choice, seeds a fresh table from a JSON file, then queries and scans it.

Environment variables:
  AWS_ENDPOINT_URL    - Use local DynamoDB (e.g., http://localhost:8000)
  AWS_REGION          - AWS region (defaults to us-east-1)
  AWS_PROFILE         - AWS profile to use for credentials")]
pub struct Cli {
    /// Table to use (created when missing).
    #[arg(long, default_value = "test_anime_table", env = "TABLE_NAME")]
    pub table_name: String,

    /// Seed file loaded into a freshly created table.
    #[arg(long, default_value = "anime_data.json", env = "SEED_FILE")]
    pub seed_file: PathBuf,

    /// Zip archive downloaded when the seed file is missing.
    #[arg(long, default_value = DEFAULT_SEED_ARCHIVE_URL, env = "SEED_ARCHIVE_URL")]
    pub seed_archive_url: String,

    /// Custom endpoint URL (for local DynamoDB).
    #[arg(long, env = "AWS_ENDPOINT_URL")]
    pub endpoint_url: Option<String>,

    /// AWS region.
    #[arg(long, default_value = "us-east-1", env = "AWS_REGION")]
    pub region: String,

    /// Items evaluated per scan page (service default when unset).
    #[arg(long, env = "SCAN_PAGE_SIZE", value_parser = clap::value_parser!(i32).range(1..))]
    pub scan_page_size: Option<i32>,
}

impl Cli {
    /// The AWS part of the settings.
    pub fn aws_config(&self) -> AwsConfig {
        AwsConfig {
            endpoint_url: self.endpoint_url.clone(),
            region: self.region.clone(),
        }
    }
}

/// AWS client configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct AwsConfig {
    /// Custom endpoint URL (for local DynamoDB).
    pub endpoint_url: Option<String>,
    /// AWS region.
    pub region: String,
}

impl AwsConfig {
    /// Returns a display string for the target environment.
    pub fn target_display(&self) -> String {
        match &self.endpoint_url {
            Some(url) => format!("Local DynamoDB ({url})"),
            None => format!("AWS DynamoDB (region: {})", self.region),
        }
    }

    /// Creates a DynamoDB client with this configuration.
    pub async fn create_client(&self) -> Client {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_config::Region::new(self.region.clone()));
        if let Some(endpoint) = &self.endpoint_url {
            loader = loader.endpoint_url(endpoint);
        }
        let sdk_config = loader.load().await;
        Client::new(&sdk_config)
    }
}
