//! Checkout Service

use async_trait::async_trait;
use gamevault::{discounts::DiscountError, pricing::QuoteError};
use jiff::Timestamp;
use mockall::automock;
use rust_decimal::Decimal;
use tracing::{Span, info};

use crate::{
    database::Db,
    domain::{
        checkout::{
            CheckoutServiceError,
            data::{NewPurchase, NewTransactionItem},
            records::{CompletedPurchase, PurchasedLine, TransactionItemUuid},
            repository::PgTransactionsRepository,
        },
        pricing::{
            repository::PgCandidatesRepository,
            service::quote_in_tx,
        },
        promotions::records::PromotionUuid,
        usage::{
            UsageServiceError, data::NewUsageRecord, records::UsageRecordUuid,
            repository::PgUsageRepository,
        },
    },
    money::decimal_from_money,
};

#[derive(Debug, Clone)]
pub struct PgCheckoutService {
    db: Db,
    transactions: PgTransactionsRepository,
    candidates: PgCandidatesRepository,
    usage: PgUsageRepository,
}

impl PgCheckoutService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            transactions: PgTransactionsRepository::new(),
            candidates: PgCandidatesRepository::new(),
            usage: PgUsageRepository::new(),
        }
    }
}

#[async_trait]
impl CheckoutService for PgCheckoutService {
    #[tracing::instrument(
        name = "checkout.service.complete_purchase",
        skip(self, purchase),
        fields(
            transaction_uuid = %purchase.uuid,
            line_count = purchase.games.len(),
            discounted_lines = tracing::field::Empty
        ),
        err
    )]
    async fn complete_purchase(
        &self,
        purchase: NewPurchase,
    ) -> Result<CompletedPurchase, CheckoutServiceError> {
        if purchase.games.is_empty() {
            return Err(CheckoutServiceError::EmptyOrder);
        }

        let now = Timestamp::now();
        let mut tx = self.db.begin().await?;

        // Prices are resolved here, at commit time, against current
        // promotion state; quotes from earlier page views are never trusted.
        let mut quotes = Vec::with_capacity(purchase.games.len());

        for game in &purchase.games {
            let quote = quote_in_tx(&self.candidates, &mut tx, *game, now).await?;

            quotes.push((*game, quote));
        }

        let total: Decimal = quotes
            .iter()
            .map(|(_, quote)| decimal_from_money(quote.final_price))
            .sum();

        let transaction = self
            .transactions
            .create_transaction(&mut tx, purchase.uuid, purchase.buyer_uuid, total)
            .await?;

        let mut lines = Vec::with_capacity(quotes.len());
        let mut discounted_lines = 0_u64;

        for (game, quote) in quotes {
            let item = self
                .transactions
                .create_transaction_item(
                    &mut tx,
                    NewTransactionItem {
                        uuid: TransactionItemUuid::new(),
                        transaction_uuid: purchase.uuid,
                        game_uuid: game,
                        price: decimal_from_money(quote.final_price),
                    },
                )
                .await?;

            let saving = quote
                .saving()
                .map_err(DiscountError::from)
                .map_err(QuoteError::from)?;
            let discount_amount = decimal_from_money(saving);

            let applied_promotion = quote.applied_promotion.map(PromotionUuid::from_uuid);

            if let Some(promotion) = applied_promotion {
                self.usage
                    .record(
                        &mut tx,
                        NewUsageRecord {
                            uuid: UsageRecordUuid::new(),
                            promotion_uuid: promotion,
                            transaction_uuid: purchase.uuid,
                            game_uuid: game,
                            discount_amount,
                            used_at: now,
                        },
                    )
                    .await
                    .map_err(UsageServiceError::from)?;

                discounted_lines += 1;
            }

            lines.push(PurchasedLine {
                item,
                base_price: decimal_from_money(quote.base_price),
                applied_promotion,
                discount_amount,
            });
        }

        tx.commit().await?;

        Span::current().record("discounted_lines", discounted_lines);

        info!(
            transaction_uuid = %transaction.uuid,
            lines = lines.len(),
            discounted_lines,
            "completed purchase"
        );

        Ok(CompletedPurchase { transaction, lines })
    }
}

#[automock]
#[async_trait]
pub trait CheckoutService: Send + Sync {
    /// Complete a purchase: re-price every line, persist the transaction and
    /// its items, and record one usage row per discounted line, all in a
    /// single database transaction. A discount is never recorded without the
    /// sale it belongs to, and vice versa.
    async fn complete_purchase(
        &self,
        purchase: NewPurchase,
    ) -> Result<CompletedPurchase, CheckoutServiceError>;
}
