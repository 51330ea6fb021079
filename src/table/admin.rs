//! Table administration: existence check, creation, listing and deletion.

use crate::common::key;
use crate::error::{Error, Result};

use aws_sdk_dynamodb::{
    Client,
    error::SdkError,
    operation::create_table::{CreateTableError, CreateTableOutput},
    types::{
        AttributeDefinition, KeySchemaElement, KeyType, ProvisionedThroughput,
        ScalarAttributeType, TableStatus,
    },
};
use std::time::Duration;

/// Schema and provisioning of the record table.
#[derive(Clone, Debug, PartialEq)]
pub struct TableConfig {
    /// Table name.
    pub table_name: String,
    /// Partition key attribute (string typed).
    pub partition_key: String,
    /// Sort key attribute (string typed).
    pub sort_key: String,
    /// Provisioned read capacity units.
    pub read_capacity_units: i64,
    /// Provisioned write capacity units.
    pub write_capacity_units: i64,
    /// How many times `DescribeTable` is polled while waiting for `ACTIVE`.
    pub activation_attempts: usize,
    /// Pause between two polls.
    pub activation_delay: Duration,
}

impl TableConfig {
    /// The record table: `category` partition key, `title` sort key, 10/10 capacity units.
    pub fn records(table_name: &str) -> Self {
        Self {
            table_name: table_name.to_string(),
            partition_key: key::CATEGORY.to_string(),
            sort_key: key::TITLE.to_string(),
            read_capacity_units: 10,
            write_capacity_units: 10,
            activation_attempts: 60,
            activation_delay: Duration::from_secs(2),
        }
    }
}

/// A table known to exist, with the last status DynamoDB reported for it.
#[derive(Clone, Debug, PartialEq)]
pub struct TableHandle {
    /// Table name.
    pub name: String,
    /// Status from the last describe call; `None` when the table was only listed.
    pub status: Option<TableStatus>,
}

/// Check whether a table exists.
///
/// Only `ResourceNotFoundException` means "no"; every other failure is an error.
#[tracing::instrument(name = "dynamodb_anime.exists", skip(client))]
pub async fn exists(client: &Client, table_name: &str) -> Result<bool> {
    match client.describe_table().table_name(table_name).send().await {
        Ok(_) => Ok(true),
        Err(err)
            if err
                .as_service_error()
                .is_some_and(|e| e.is_resource_not_found_exception()) =>
        {
            tracing::debug!("table does not exist");
            Ok(false)
        }
        Err(err) => Err(Error::service("DescribeTable", table_name, err)),
    }
}

/// Describe a table and return its handle.
pub async fn describe(client: &Client, table_name: &str) -> Result<TableHandle> {
    let output = client
        .describe_table()
        .table_name(table_name)
        .send()
        .await
        .map_err(|err| Error::service("DescribeTable", table_name, err))?;
    Ok(TableHandle {
        name: table_name.to_string(),
        status: output.table.and_then(|table| table.table_status),
    })
}

/// Create the table and wait until it is `ACTIVE`.
#[tracing::instrument(name = "dynamodb_anime.create_table", skip(client, config), fields(table = %config.table_name))]
pub async fn create_table(client: &Client, config: &TableConfig) -> Result<TableHandle> {
    send_create_table(client, config)
        .await
        .map_err(|err| Error::service("CreateTable", &config.table_name, err))?;
    tracing::info!("table creation requested");

    let handle = wait_for_table_active(client, config).await?;
    tracing::info!("table is active");
    Ok(handle)
}

async fn send_create_table(
    client: &Client,
    config: &TableConfig,
) -> std::result::Result<CreateTableOutput, SdkError<CreateTableError>> {
    let key_schema = vec![
        KeySchemaElement::builder()
            .attribute_name(&config.partition_key)
            .key_type(KeyType::Hash)
            .build()?,
        KeySchemaElement::builder()
            .attribute_name(&config.sort_key)
            .key_type(KeyType::Range)
            .build()?,
    ];
    let attribute_definitions = vec![
        AttributeDefinition::builder()
            .attribute_name(&config.partition_key)
            .attribute_type(ScalarAttributeType::S)
            .build()?,
        AttributeDefinition::builder()
            .attribute_name(&config.sort_key)
            .attribute_type(ScalarAttributeType::S)
            .build()?,
    ];
    let throughput = ProvisionedThroughput::builder()
        .read_capacity_units(config.read_capacity_units)
        .write_capacity_units(config.write_capacity_units)
        .build()?;
    client
        .create_table()
        .table_name(&config.table_name)
        .set_key_schema(Some(key_schema))
        .set_attribute_definitions(Some(attribute_definitions))
        .provisioned_throughput(throughput)
        .send()
        .await
}

async fn wait_for_table_active(client: &Client, config: &TableConfig) -> Result<TableHandle> {
    for attempt in 0..config.activation_attempts {
        let handle = describe(client, &config.table_name).await?;
        if handle.status == Some(TableStatus::Active) {
            return Ok(handle);
        }
        tracing::debug!(attempt, status = ?handle.status, "waiting for table");
        tokio::time::sleep(config.activation_delay).await;
    }
    Err(Error::TableActivationTimeout {
        table_name: config.table_name.clone(),
    })
}

/// List every table of the account, following the `ListTables` pagination.
#[tracing::instrument(name = "dynamodb_anime.list_tables", skip(client))]
pub async fn list_tables(client: &Client) -> Result<Vec<TableHandle>> {
    let mut paginator = client.list_tables().into_paginator().send();
    let mut tables = Vec::new();
    while let Some(page) = paginator.next().await {
        let page = page.map_err(|err| Error::service("ListTables", "*", err))?;
        tables.extend(page.table_names.unwrap_or_default().into_iter().map(|name| TableHandle {
            name,
            status: None,
        }));
    }
    tracing::debug!(tables = tables.len(), "tables listed");
    Ok(tables)
}

/// Delete a table and everything in it.
#[tracing::instrument(name = "dynamodb_anime.delete_table", skip(client))]
pub async fn delete_table(client: &Client, table_name: &str) -> Result<()> {
    client
        .delete_table()
        .table_name(table_name)
        .send()
        .await
        .map_err(|err| Error::service("DeleteTable", table_name, err))?;
    tracing::info!("table deleted");
    Ok(())
}
