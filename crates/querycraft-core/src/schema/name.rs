use heck::ToSnakeCase;

/// Derives a table name from a type name: snake case, last word pluralized.
///
/// `UserProfile` becomes `user_profiles`.
pub fn default_table_name(type_name: &str) -> String {
    let snake = type_name.to_snake_case();

    match snake.rsplit_once('_') {
        Some((head, last)) => format!("{head}_{}", pluralizer::pluralize(last, 2, false)),
        None => pluralizer::pluralize(&snake, 2, false),
    }
}
