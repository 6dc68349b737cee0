use crate::entities::id_sequence;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, TransactionTrait,
};

pub const TEACHER_SEQUENCE: &str = "teacher";
pub const STUDENT_SEQUENCE: &str = "student";

pub struct IdSequenceRepository {
    db: DatabaseConnection,
}

impl IdSequenceRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Bumps the named counter and reads it back in one transaction. The
    /// update holds the row lock until commit, so concurrent callers never
    /// see the same value.
    pub async fn next_value(&self, name: &str) -> Result<i64, DbErr> {
        let txn = self.db.begin().await?;

        let result = id_sequence::Entity::update_many()
            .col_expr(
                id_sequence::Column::LastValue,
                Expr::col(id_sequence::Column::LastValue).add(1),
            )
            .filter(id_sequence::Column::Name.eq(name))
            .exec(&txn)
            .await?;
        if result.rows_affected == 0 {
            return Err(DbErr::RecordNotFound(format!("id sequence '{name}'")));
        }

        let sequence = id_sequence::Entity::find_by_id(name.to_string())
            .one(&txn)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound(format!("id sequence '{name}'")))?;

        txn.commit().await?;
        Ok(sequence.last_value)
    }

    /// Next identifier for the sequence, e.g. `TCH00001`.
    pub async fn next_identifier(&self, name: &str, prefix: &str) -> Result<String, DbErr> {
        let value = self.next_value(name).await?;
        Ok(format_identifier(prefix, value))
    }
}

pub fn format_identifier(prefix: &str, value: i64) -> String {
    format!("{prefix}{value:05}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pads_to_five_digits() {
        assert_eq!(format_identifier("TCH", 1), "TCH00001");
        assert_eq!(format_identifier("STU", 4321), "STU04321");
    }

    #[test]
    fn keeps_growing_past_five_digits() {
        assert_eq!(format_identifier("TCH", 123456), "TCH123456");
    }
}
