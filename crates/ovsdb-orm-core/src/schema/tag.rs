use super::Kind;
use crate::wire::UUID_COLUMN;

/// A parsed binding tag: `column[,option]*`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Tag {
    pub(crate) column: String,
    pub(crate) identifier: bool,
    pub(crate) reference: bool,
    pub(crate) index: bool,
    pub(crate) kind: Option<Kind>,
}

impl Tag {
    pub(crate) fn parse(src: &str) -> Result<Tag, String> {
        let mut parts = src.split(',').map(str::trim);

        let column = parts.next().unwrap_or_default();
        if column.is_empty() {
            return Err(format!("binding `{src}` has no column"));
        }
        if !is_column_name(column) {
            return Err(format!("binding `{src}` has an invalid column name `{column}`"));
        }

        let mut tag = Tag {
            column: column.to_string(),
            identifier: column == UUID_COLUMN,
            reference: false,
            index: false,
            kind: None,
        };
        let mut seen = vec![];

        for option in parts {
            if seen.contains(&option) {
                return Err(format!("binding `{src}` repeats option `{option}`"));
            }
            seen.push(option);

            let kind = match option {
                "uuid" => {
                    tag.identifier = true;
                    continue;
                }
                "ref" => {
                    tag.reference = true;
                    continue;
                }
                "index" => {
                    tag.index = true;
                    continue;
                }
                "int" | "integer" => Kind::Integer,
                "bool" | "boolean" => Kind::Boolean,
                "string" => Kind::String,
                "map" => Kind::StringMap,
                "set" => Kind::StringSet,
                "" => return Err(format!("binding `{src}` has an empty option")),
                other => return Err(format!("binding `{src}` has unknown option `{other}`")),
            };

            if tag.kind.replace(kind).is_some() {
                return Err(format!("binding `{src}` declares more than one kind"));
            }
        }

        Ok(tag)
    }
}

fn is_column_name(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
