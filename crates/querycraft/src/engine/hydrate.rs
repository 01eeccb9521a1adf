use super::Engine;
use crate::FromRecord;

use querycraft_core::{
    schema::{EntityMetadata, ReturnShape},
    stmt::Record,
    Result,
};

impl Engine {
    pub(crate) fn hydrate<E: FromRecord>(
        &self,
        rows: &[Record],
        meta: &EntityMetadata,
    ) -> Result<Vec<E>> {
        rows.iter()
            .map(|row| E::from_record(self.shape(row.clone(), meta)?))
            .collect()
    }

    /// Applies the entity's return shape to one raw row.
    fn shape(&self, row: Record, meta: &EntityMetadata) -> Result<Record> {
        if meta.return_shape == ReturnShape::Raw {
            return Ok(row);
        }

        let cx = self.cx.cast_context();

        row.into_iter()
            .filter(|(field, _)| !meta.is_hidden(field))
            .map(|(field, value)| {
                let value = match meta.cast_for(&field) {
                    Some(cast) => self.cx.casts().decode(value, cast, &cx)?,
                    None => value,
                };
                Ok((field, value))
            })
            .collect()
    }
}
