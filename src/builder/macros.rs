//! Macros for ergonomic identifier declaration.

/// Declare a dense `#[repr(u8)]` identifier enum for states or events.
///
/// The generated type is `Copy + Eq + Hash + Debug` and serde-serializable,
/// and gains `ALL`, `name()` and `index()`. The serde derives go through
/// this crate's re-export, so callers need no `serde` dependency of their
/// own as long as the crate is imported as `fixedstate`.
///
/// # Example
///
/// ```
/// use fixedstate::id_enum;
///
/// id_enum! {
///     pub enum MotorState {
///         Idle,
///         Running,
///         Fault,
///     }
/// }
///
/// assert_eq!(MotorState::Running.name(), "Running");
/// assert_eq!(MotorState::Fault.index(), 2);
/// assert_eq!(MotorState::ALL.len(), 3);
/// ```
#[macro_export]
macro_rules! id_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            Debug,
            $crate::serde::Serialize,
            $crate::serde::Deserialize,
        )]
        #[serde(crate = "fixedstate::serde")]
        #[repr(u8)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),+
        }

        impl $name {
            /// Every variant in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            pub fn name(&self) -> &'static str {
                match self {
                    $(Self::$variant => stringify!($variant)),+
                }
            }

            pub fn index(&self) -> u8 {
                *self as u8
            }
        }
    };
}
