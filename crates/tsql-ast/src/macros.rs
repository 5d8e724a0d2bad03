//! Declaration helpers shared by the node modules

/// Declares a node family: an untagged enum whose variants each box the
/// node struct of the same name. Every node struct writes its own `$type`,
/// so the family itself adds nothing to the JSON projection.
macro_rules! node_enum {
    ($(#[$meta:meta])* pub enum $family:ident { $($name:ident),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Serialize)]
        #[serde(untagged)]
        pub enum $family {
            $($name(Box<$name>),)+
        }

        impl $family {
            /// Rust type name of the concrete node
            pub fn kind(&self) -> &'static str {
                match self {
                    $($family::$name(_) => stringify!($name),)+
                }
            }
        }

        $(
            impl From<$name> for $family {
                fn from(node: $name) -> Self {
                    $family::$name(Box::new(node))
                }
            }
        )+
    };
}

/// Declares several node structs that share one field layout but carry
/// distinct `$type` tags (e.g. the many `DROP <kind> name, ...` statements).
macro_rules! same_shape_nodes {
    ($fields:tt => $($(#[$attr:meta])* $name:ident),+ $(,)?) => {
        $(
            $(#[$attr])*
            #[derive(Debug, Clone, PartialEq, Serialize)]
            #[serde(tag = "$type", rename_all = "PascalCase")]
            pub struct $name $fields
        )+
    };
}
