use crate::{Model, Result};

use ovsdb_orm_core::{
    cache::CacheRead,
    codec::{self, FieldValue},
    schema::{FieldDescriptor, ModelSchema},
    wire::Row,
    Error,
};

/// The usable comparison fields of a probe model, with their values.
pub(crate) type Probe<'a> = Vec<(&'a FieldDescriptor, FieldValue)>;

/// Resolves `names` to fields and reads their values from `model`, leaving
/// out fields that are unset.
///
/// No names means the default index set: every declared index field plus
/// the identifier.
pub(crate) fn probe<'a, M: Model>(
    schema: &'a ModelSchema,
    model: &M,
    names: &[&str],
) -> Result<Probe<'a>> {
    let fields = if names.is_empty() {
        default_index_set(schema)
    } else {
        names
            .iter()
            .map(|name| schema.expect_field(name))
            .collect::<Result<Vec<_>>>()?
    };

    Ok(fields
        .into_iter()
        .filter_map(|field| {
            let value = model.field(field.index)?;
            (!value.is_unset()).then_some((field, value))
        })
        .collect())
}

/// Names of the declared index fields, identifier excluded.
pub(crate) fn index_names(schema: &ModelSchema) -> Vec<&'static str> {
    schema
        .indexes()
        .filter(|field| !field.is_identifier())
        .map(|field| field.name)
        .collect()
}

pub(crate) fn default_index_set(schema: &ModelSchema) -> Vec<&FieldDescriptor> {
    schema
        .indexes()
        .filter(|field| !field.is_identifier())
        .chain(std::iter::once(schema.identifier()))
        .collect()
}

/// Finds the cached rows of `schema`'s table equal to `probe` on every
/// probed field, ordered by identifier.
pub(crate) fn find(
    schema: &ModelSchema,
    cache: &CacheRead<'_>,
    probe: &Probe<'_>,
) -> Result<Vec<(String, Row)>> {
    let table = schema.table.as_str();

    if probe.is_empty() {
        return match cache.len(table) {
            0 | 1 => Ok(collect(cache.scan(table))),
            rows => Err(Error::ambiguous_index(table, rows)),
        };
    }

    let identifier = probe
        .iter()
        .find(|(field, _)| field.is_identifier())
        .and_then(|(_, value)| value.as_str());

    let found = match identifier {
        // Known identifier, no scan
        Some(id) => collect(
            cache
                .lookup(table, id)
                .map(|row| (id, row))
                .into_iter()
                .filter(|(id, row)| matches(probe, id, row)),
        ),
        None => {
            let mut found = collect(cache.scan(table).filter(|(id, row)| matches(probe, id, row)));
            found.sort_by(|a, b| a.0.cmp(&b.0));
            found
        }
    };

    tracing::trace!(table, probed = probe.len(), found = found.len(), "index lookup");
    Ok(found)
}

fn collect<'a>(rows: impl Iterator<Item = (&'a str, &'a Row)>) -> Vec<(String, Row)> {
    rows.map(|(id, row)| (id.to_string(), row.clone())).collect()
}

fn matches(probe: &Probe<'_>, id: &str, row: &Row) -> bool {
    probe.iter().all(|(field, expected)| {
        if field.is_identifier() {
            return expected.as_str() == Some(id);
        }

        let Some(value) = row.get(&field.column) else {
            return false;
        };

        match codec::decode(field, value) {
            Ok(Some(actual)) => actual.matches(expected),
            Ok(None) => false,
            Err(err) => {
                tracing::trace!(uuid = id, column = %field.column, %err, "cached value does not decode");
                false
            }
        }
    })
}
