use sea_orm_migration::prelude::*;
use sea_orm_migration::prelude::extension::postgres::Type;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_type(
                Type::create()
                    .as_enum(PaymentState::Enum)
                    .values([
                        PaymentState::Pending,
                        PaymentState::Completed,
                        PaymentState::Failed,
                        PaymentState::Refunded,
                    ])
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Payments::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Payments::Id).text().primary_key().not_null())
                    .col(ColumnDef::new(Payments::OrderId).text().not_null())
                    .col(ColumnDef::new(Payments::TransactionId).string().null())
                    .col(
                        ColumnDef::new(Payments::Amount)
                            .decimal_len(12, 2)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Payments::Method)
                            .enumeration(
                                PaymentMethod::Enum,
                                [
                                    PaymentMethod::CreditCard,
                                    PaymentMethod::DebitCard,
                                    PaymentMethod::Paypal,
                                    PaymentMethod::BankTransfer,
                                    PaymentMethod::CashOnDelivery,
                                ],
                            )
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Payments::Status)
                            .enumeration(
                                PaymentState::Enum,
                                [
                                    PaymentState::Pending,
                                    PaymentState::Completed,
                                    PaymentState::Failed,
                                    PaymentState::Refunded,
                                ],
                            )
                            .not_null()
                            .default("pending"),
                    )
                    .col(ColumnDef::new(Payments::GatewayResponse).text().null())
                    .col(ColumnDef::new(Payments::PaidAt).timestamp().null())
                    .col(ColumnDef::new(Payments::CreatedAt).timestamp().not_null())
                    .col(ColumnDef::new(Payments::UpdatedAt).timestamp().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_payments_order_id")
                            .from(Payments::Table, Payments::OrderId)
                            .to(Orders::Table, Orders::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_payments_transaction_id")
                    .table(Payments::Table)
                    .col(Payments::TransactionId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Payments::Table).to_owned())
            .await?;
        manager
            .drop_type(Type::drop().name(PaymentState::Enum).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Payments {
    Table,
    Id,
    OrderId,
    TransactionId,
    Amount,
    Method,
    Status,
    GatewayResponse,
    PaidAt,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Orders {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum PaymentMethod {
    #[sea_orm(iden = "payment_method")]
    Enum,
    CreditCard,
    DebitCard,
    Paypal,
    BankTransfer,
    CashOnDelivery,
}

#[derive(DeriveIden)]
enum PaymentState {
    #[sea_orm(iden = "payment_state")]
    Enum,
    Pending,
    Completed,
    Failed,
    Refunded,
}
