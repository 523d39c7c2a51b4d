use crate::{common, read};

use aws_sdk_dynamodb::{Client, error, operation};

/// scan operation
#[derive(Clone, Debug, Default, PartialEq)]
struct ScanInput {
    exclusive_start_key: Option<common::Record>,
    table_name: String,
}

/// Scan operation, fetching a single page of a table.
///
/// ```rust,no_run
/// use aws_sdk_dynamodb::Client;
/// use gearbox_catalog::read;
///
/// # async fn example(client: &Client) -> Result<(), Box<dyn std::error::Error>> {
/// let mut scan = read::scan::Scan {
///     table_name: "gearbox_catalog".to_string(),
///     ..Default::default()
/// };
/// loop {
///     let page = scan.clone().send(client).await?;
///     match page.last_evaluated_key {
///         Some(key) => scan.exclusive_start_key = Some(key),
///         None => break,
///     }
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scan {
    /// Key to resume a previous scan from.
    ///
    /// Typically obtained from the `last_evaluated_key` of the previous page.
    pub exclusive_start_key: Option<common::Record>,
    /// The name of the table to scan.
    pub table_name: String,
}

impl From<Scan> for ScanInput {
    fn from(scan: Scan) -> Self {
        Self {
            exclusive_start_key: scan.exclusive_start_key,
            table_name: scan.table_name,
        }
    }
}

impl Scan {
    /// Execute the scan operation.
    #[tracing::instrument(
        name = "gearbox_catalog.scan",
        skip_all,
        fields(resumed = self.exclusive_start_key.is_some()),
        err
    )]
    pub async fn send(
        self,
        client: &Client,
    ) -> Result<read::common::ReadPage, error::SdkError<operation::scan::ScanError>> {
        let scan: ScanInput = self.into();
        let output = client
            .scan()
            .set_exclusive_start_key(scan.exclusive_start_key)
            .table_name(scan.table_name)
            .send()
            .await?;
        Ok(output.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use aws_sdk_dynamodb::types;
    use rstest::rstest;

    #[rstest]
    #[case::first_page(
        Scan {
            table_name: "a".to_string(),
            ..Default::default()
        },
        ScanInput {
            table_name: "a".to_string(),
            ..Default::default()
        }
    )]
    #[case::resumed(
        Scan {
            exclusive_start_key: Some(
                common::Record::from(
                    [
                        (
                            "PK".to_string(),
                            types::AttributeValue::S(
                                "gearbox#GB-003".to_string()
                            )
                        ),
                    ]
                )
            ),
            table_name: "h".to_string(),
        },
        ScanInput {
            exclusive_start_key: Some(
                common::Record::from(
                    [
                        (
                            "PK".to_string(),
                            types::AttributeValue::S(
                                "gearbox#GB-003".to_string()
                            )
                        ),
                    ]
                )
            ),
            table_name: "h".to_string(),
        }
    )]
    fn test_scan(#[case] args: Scan, #[case] expected: ScanInput) {
        let actual: ScanInput = args.into();
        assert_eq!(actual, expected);
    }
}
