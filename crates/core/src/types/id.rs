//! Newtype IDs for type-safe record references.
//!
//! Every record kind in the console is keyed by a short string (`"007"`,
//! `"ORD-003"`, `"WH-002"`). Use the `define_id!` macro to create wrappers that
//! prevent accidentally looking up an order with a warehouse ID.

/// Macro to define a type-safe, string-backed ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`, `PartialOrd`, `Ord`
/// - `new()`, `as_str()`, `Display`, `From<String>`, `From<&str>`
///
/// # Example
///
/// ```rust
/// # use ims_core::define_id;
/// define_id!(PalletId);
/// define_id!(BinId);
///
/// let pallet = PalletId::new("P-01");
/// assert_eq!(pallet.as_str(), "P-01");
///
/// // These are different types, so this won't compile:
/// // let _: BinId = pallet;
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from anything string-like.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Borrow the underlying string.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(UserId);
define_id!(InventoryItemId);
define_id!(OrderId);
define_id!(WarehouseId);
define_id!(CustomerId);
define_id!(ShipmentId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_compare_by_string() {
        assert!(OrderId::new("ORD-001") < OrderId::new("ORD-002"));
        assert_eq!(WarehouseId::from("WH-003").to_string(), "WH-003");
    }

    #[test]
    fn test_ids_serialize_transparently() {
        let id = InventoryItemId::new("004");
        assert_eq!(serde_json::to_string(&id).ok().as_deref(), Some("\"004\""));
    }
}
