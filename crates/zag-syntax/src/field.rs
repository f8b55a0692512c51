//! Named roles that bind a child to its parent.

use std::fmt;

macro_rules! fields {
    ($($variant:ident => $name:literal,)*) => {
        /// A field name. A node binds each field to at most one child.
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
        pub enum Field {
            $($variant,)*
        }

        impl Field {
            pub const ALL: &'static [Field] = &[$(Field::$variant,)*];

            /// The field name as written in the grammar.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Field::$variant => $name,)*
                }
            }

            pub fn from_name(name: &str) -> Option<Self> {
                match name {
                    $($name => Some(Field::$variant),)*
                    _ => None,
                }
            }
        }
    };
}

fields! {
    Alternative => "alternative",
    Arguments => "arguments",
    Body => "body",
    Condition => "condition",
    Consequence => "consequence",
    Element => "element",
    Expression => "expression",
    Field => "field",
    Function => "function",
    Index => "index",
    Key => "key",
    Left => "left",
    Name => "name",
    Operand => "operand",
    Operator => "operator",
    Params => "params",
    Path => "path",
    ReturnType => "return_type",
    Right => "right",
    Size => "size",
    Type => "type",
    TypeParams => "type_params",
    Value => "value",
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::Field;

    #[test]
    fn names_round_trip() {
        for &field in Field::ALL {
            assert_eq!(Field::from_name(field.as_str()), Some(field));
        }
        assert_eq!(Field::from_name("nope"), None);
    }
}
