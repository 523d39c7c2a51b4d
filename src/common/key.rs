use crate::common;

use aws_sdk_dynamodb::types;
use std::fmt;

/// Attribute name of the partition key.
pub const PARTITION_KEY: &str = "PK";

/// Attribute name of the sort key.
pub const SORT_KEY: &str = "SK";

/// The single sort key value every item is stored under.
pub const METADATA_SORT_KEY: &str = "metadata";

/// Kind of item stored in the catalog table.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ItemKind {
    /// A product category.
    Category,
    /// A gearbox product.
    Gearbox,
}

impl ItemKind {
    /// Prefix of partition keys holding items of this kind.
    ///
    /// ```rust
    /// use gearbox_catalog::common::key::ItemKind;
    ///
    /// assert_eq!(ItemKind::Gearbox.prefix(), "gearbox#");
    /// ```
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Category => "category#",
            Self::Gearbox => "gearbox#",
        }
    }

    /// Kind encoded in a partition key, if any.
    pub fn of_partition_key(partition_key: &str) -> Option<Self> {
        [Self::Category, Self::Gearbox]
            .into_iter()
            .find(|kind| partition_key.starts_with(kind.prefix()))
    }
}

/// Primary key (partition key and sort key) of a catalog item.
///
/// ```rust
/// use gearbox_catalog::common::key;
///
/// let keys = key::Keys::new(key::ItemKind::Gearbox, "GB-001");
/// assert_eq!(keys.partition_key, "gearbox#GB-001");
/// assert_eq!(keys.sort_key, "metadata");
/// ```
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Keys {
    /// The composite `<kind>#<id>` partition key.
    pub partition_key: String,
    /// The sort key.
    pub sort_key: String,
}

impl Keys {
    /// Keys of the item of `kind` identified by `id`.
    pub fn new(kind: ItemKind, id: &str) -> Self {
        Self {
            partition_key: format!("{}{id}", kind.prefix()),
            sort_key: METADATA_SORT_KEY.to_string(),
        }
    }

    /// Keys of a stored record, if it carries both key attributes as strings.
    pub fn of_record(record: &common::Record) -> Option<Self> {
        let partition_key = record.get(PARTITION_KEY)?.as_s().ok()?;
        let sort_key = record.get(SORT_KEY)?.as_s().ok()?;
        Some(Self {
            partition_key: partition_key.clone(),
            sort_key: sort_key.clone(),
        })
    }
}

impl fmt::Display for Keys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.partition_key, self.sort_key)
    }
}

impl From<Keys> for common::Record {
    fn from(keys: Keys) -> Self {
        Self::from([
            (
                PARTITION_KEY.to_string(),
                types::AttributeValue::S(keys.partition_key),
            ),
            (
                SORT_KEY.to_string(),
                types::AttributeValue::S(keys.sort_key),
            ),
        ])
    }
}
