//! The `record!` declaration macro.

/// Declare a struct together with its [`Record`](crate::Record) field table.
///
/// Each field may carry a tag block after its type: `=> { key: "annotation", .. }`.
/// Fields without a tag block are declared normally but stay hidden from
/// listings and lookups. Attributes on the struct and its fields are passed
/// through, so serde derives and renames work as usual.
///
/// # Example
///
/// ```rust
/// use tagfs_record::{list_names, record};
///
/// record! {
///     #[derive(Debug, Default)]
///     pub struct Ipv6 {
///         pub address: String => { json: "ip_address", yaml: "address" },
///         pub cidr: u8 => { json: "cidr" },
///         pub gateway: String => { json: "gateway" },
///         pub scope: String,
///     }
/// }
///
/// let ip = Ipv6::default();
/// assert_eq!(list_names(&ip, "json").unwrap(), vec!["ip_address", "cidr", "gateway"]);
/// assert_eq!(list_names(&ip, "yaml").unwrap(), vec!["address"]);
/// ```
#[macro_export]
macro_rules! record {
    (
        $(#[$attr:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$field_attr:meta])*
                $field_vis:vis $field:ident : $ty:ty
                $(=> { $($key:ident : $annotation:literal),* $(,)? })?
            ),* $(,)?
        }
    ) => {
        $(#[$attr])*
        $vis struct $name {
            $(
                $(#[$field_attr])*
                $field_vis $field: $ty,
            )*
        }

        impl $crate::Record for $name {
            fn fields(&self) -> ::std::vec::Vec<$crate::Field<'_>> {
                ::std::vec![
                    $(
                        $crate::Field::new(
                            ::core::stringify!($field),
                            &[$($((::core::stringify!($key), $annotation)),*)?],
                            &self.$field,
                        ),
                    )*
                ]
            }
        }

        impl $crate::Node for $name {
            fn node(&self) -> $crate::FieldValue<'_> {
                $crate::FieldValue::Struct(self)
            }
        }
    };
}
