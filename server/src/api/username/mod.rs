pub mod check_unique;

use data_access::DataAccess;

use crate::types::Username;

/// Only verified accounts hold on to their name. Comparison is exact and case-sensitive.
pub async fn verified_username_exists(
    data_access: &DataAccess,
    username: &Username,
) -> Result<bool, data_access::Error> {
    let row = data_access
        .read(|pool| {
            sqlx::query_scalar::<_, i64>(
                "SELECT id FROM users WHERE username = ? AND is_verified = TRUE LIMIT 1",
            )
            .bind(username)
            .fetch_optional(pool)
        })
        .await?;

    match row {
        Some(_) => Ok(true),
        None => Ok(false),
    }
}
