use crate::schema::*;

pub fn default_tables(width: IdWidth) -> Vec<Table> {
    Bucket::ALL
        .into_iter()
        .map(|bucket| Table::new(bucket, width))
        .collect()
}
