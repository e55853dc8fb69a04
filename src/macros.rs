//! Accessor macros for the node sum types.
//!
//! All macros use `paste` internally for identifier concatenation.

/// Generate is_xxx, as_xxx, as_xxx_mut for enums with typed variants
///
/// Uses paste's `:camel` modifier to convert method name to variant name,
/// which must also be the name of the payload type.
///
/// # Generated methods per variant:
/// - `is_xxx(&self) -> bool`
/// - `as_xxx(&self) -> Option<&Type>`
/// - `as_xxx_mut(&mut self) -> Option<&mut Type>`
///
/// # Example
/// ```ignore
/// impl Node {
///     // block -> Block, text -> Text, inline -> Inline
///     impl_enum_accessors!(block, text, inline);
/// }
/// ```
#[macro_export]
macro_rules! impl_enum_accessors {
    ($($variant:ident),* $(,)?) => {
        ::paste::paste! {
            $(
                #[doc = "Check if this is a " [<$variant:camel>] " node"]
                pub fn [<is_ $variant>](&self) -> bool {
                    matches!(self, Self::[<$variant:camel>](_))
                }

                #[doc = "Try to get as " $variant " reference"]
                pub fn [<as_ $variant>](&self) -> Option<&[<$variant:camel>]> {
                    match self { Self::[<$variant:camel>](v) => Some(v), _ => None }
                }

                #[doc = "Try to get as mutable " $variant " reference"]
                pub fn [<as_ $variant _mut>](&mut self) -> Option<&mut [<$variant:camel>]> {
                    match self { Self::[<$variant:camel>](v) => Some(v), _ => None }
                }
            )*
        }
    };
}

/// Generate `name()` for a fieldless-or-not enum from `Variant => "name"` pairs.
///
/// Patterns use `{ .. }` so variants with and without payloads both match.
///
/// # Example
/// ```ignore
/// impl BlockKind {
///     impl_type_names!(Paragraph => "paragraph", Heading => "heading");
/// }
/// ```
#[macro_export]
macro_rules! impl_type_names {
    ($($variant:ident => $name:literal),* $(,)?) => {
        /// ADF `type` discriminator for this variant.
        pub fn type_name(&self) -> &'static str {
            match self {
                $(Self::$variant { .. } => $name,)*
            }
        }
    };
}
