use crate::common;

use aws_sdk_dynamodb::operation;

/// One page of a multiple-item read.
///
/// The read is exhausted once `last_evaluated_key` is `None`; otherwise it
/// continues from that key.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ReadPage {
    /// Items returned in this page.
    pub items: Vec<common::Record>,
    /// Key to resume the read from, if more items remain.
    pub last_evaluated_key: Option<common::Record>,
}

impl From<operation::scan::ScanOutput> for ReadPage {
    fn from(output: operation::scan::ScanOutput) -> Self {
        Self {
            items: output.items.unwrap_or_default(),
            last_evaluated_key: output
                .last_evaluated_key
                .filter(|last_evaluated_key| !last_evaluated_key.is_empty()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use aws_sdk_dynamodb::types;
    use rstest::rstest;

    fn keys() -> common::Record {
        common::Record::from([(
            "PK".to_string(),
            types::AttributeValue::S("gearbox#GB-002".to_string()),
        )])
    }

    #[rstest]
    #[case::last_page(
        operation::scan::ScanOutput::builder()
            .set_items(Some(vec![keys()]))
            .build(),
        ReadPage {
            items: vec![keys()],
            last_evaluated_key: None,
        }
    )]
    #[case::more_pages(
        operation::scan::ScanOutput::builder()
            .set_items(Some(vec![keys()]))
            .set_last_evaluated_key(Some(keys()))
            .build(),
        ReadPage {
            items: vec![keys()],
            last_evaluated_key: Some(keys()),
        }
    )]
    #[case::empty_last_key(
        operation::scan::ScanOutput::builder()
            .set_last_evaluated_key(Some(common::Record::new()))
            .build(),
        ReadPage::default()
    )]
    fn test_read_page(#[case] output: operation::scan::ScanOutput, #[case] expected: ReadPage) {
        let actual: ReadPage = output.into();
        assert_eq!(actual, expected);
    }
}
