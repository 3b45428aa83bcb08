use diesel::sql_types::{Nullable, SingleValue, SqlType};

diesel::define_sql_function! {
    /// `COALESCE(x, y)`; used so an upsert never replaces a known value with NULL.
    fn coalesce<T: SqlType + SingleValue>(x: Nullable<T>, y: Nullable<T>) -> Nullable<T>;
}
