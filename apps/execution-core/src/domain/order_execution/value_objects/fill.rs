//! A single execution against an order.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::order_execution::errors::OrderError;
use crate::domain::shared::{Currency, FillId, LiquiditySide, Price, Quantity};

/// Economic terms of one execution.
///
/// `exchange_rate` converts the quote-currency notional into
/// `settlement_currency`; when absent the fill settles in the quote currency.
/// Deserialized fills are checked exactly like ones built with [`Fill::new`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "FillTerms")]
pub struct Fill {
    fill_id: FillId,
    quantity: Quantity,
    price: Price,
    liquidity_side: LiquiditySide,
    quote_currency: Currency,
    exchange_rate: Option<Decimal>,
    settlement_currency: Option<Currency>,
}

#[derive(Deserialize)]
struct FillTerms {
    fill_id: FillId,
    quantity: Quantity,
    price: Price,
    liquidity_side: LiquiditySide,
    quote_currency: Currency,
    #[serde(default)]
    exchange_rate: Option<Decimal>,
    #[serde(default)]
    settlement_currency: Option<Currency>,
}

impl TryFrom<FillTerms> for Fill {
    type Error = OrderError;

    fn try_from(terms: FillTerms) -> Result<Self, Self::Error> {
        let fill = Self::new(
            terms.fill_id,
            terms.quantity,
            terms.price,
            terms.liquidity_side,
            terms.quote_currency,
        )?;
        Ok(match (terms.settlement_currency, terms.exchange_rate) {
            (Some(currency), Some(rate)) => fill.settled_in(currency, rate),
            _ => fill,
        })
    }
}

impl Fill {
    /// Create a fill settling in its quote currency.
    ///
    /// # Errors
    ///
    /// Returns `InvalidQuantity` if the quantity is not positive, or
    /// `InvalidPrice` if the price is negative.
    pub fn new(
        fill_id: FillId,
        quantity: Quantity,
        price: Price,
        liquidity_side: LiquiditySide,
        quote_currency: Currency,
    ) -> Result<Self, OrderError> {
        if !quantity.is_positive() {
            return Err(OrderError::InvalidQuantity {
                quantity: quantity.amount(),
                reason: "fill quantity must be positive".to_string(),
            });
        }
        if price.is_negative() {
            return Err(OrderError::InvalidPrice {
                price: price.amount(),
                reason: "fill price must not be negative".to_string(),
            });
        }
        Ok(Self {
            fill_id,
            quantity,
            price,
            liquidity_side,
            quote_currency,
            exchange_rate: None,
            settlement_currency: None,
        })
    }

    /// Settle in another currency at `exchange_rate` (quote → settlement).
    #[must_use]
    pub fn settled_in(mut self, settlement_currency: Currency, exchange_rate: Decimal) -> Self {
        self.settlement_currency = Some(settlement_currency);
        self.exchange_rate = Some(exchange_rate);
        self
    }

    /// Get the fill ID.
    #[must_use]
    pub const fn fill_id(&self) -> &FillId {
        &self.fill_id
    }

    /// Get the filled quantity.
    #[must_use]
    pub const fn quantity(&self) -> Quantity {
        self.quantity
    }

    /// Get the fill price.
    #[must_use]
    pub const fn price(&self) -> Price {
        self.price
    }

    /// Get the liquidity side.
    #[must_use]
    pub const fn liquidity_side(&self) -> LiquiditySide {
        self.liquidity_side
    }

    /// Get the quote currency.
    #[must_use]
    pub const fn quote_currency(&self) -> Currency {
        self.quote_currency
    }

    /// Exchange rate to the settlement currency, 1 when settling in quote currency.
    #[must_use]
    pub fn exchange_rate(&self) -> Decimal {
        self.exchange_rate.unwrap_or(Decimal::ONE)
    }

    /// Currency the commission on this fill is charged in.
    #[must_use]
    pub fn settlement_currency(&self) -> Currency {
        self.settlement_currency.unwrap_or(self.quote_currency)
    }
}
