use crate::entities::course;
use crate::entities::prelude::*;
use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::Schema;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let backend = manager.get_database_backend();
        let schema = Schema::new(backend);

        manager
            .create_table(
                schema
                    .create_table_from_entity(Course)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        // Composite indexes covering the common filter paths.
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("ix_courses_dept_level_mode")
                    .table(Course)
                    .col(course::Column::Department)
                    .col(course::Column::Level)
                    .col(course::Column::DeliveryMode)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("ix_courses_fee_rating")
                    .table(Course)
                    .col(course::Column::TuitionFee)
                    .col(course::Column::Rating)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("ix_courses_name")
                    .table(Course)
                    .col(course::Column::CourseName)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Course).to_owned())
            .await?;
        Ok(())
    }
}
