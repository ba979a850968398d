use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "snake_case")]
pub enum PaymentState {
    Checkout,
    Processing,
    Pending,
    Completed,
    Failed,
    Void,
    Invalid,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "snake_case")]
pub enum OrderPaymentState {
    BalanceDue,
    CreditOwed,
    Failed,
    Paid,
    Void,
}

/// Lifecycle actions a card-backed payment supports.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Capture,
    Void,
    Credit,
}

/// Read-only view of a payment owned by the order subsystem.
pub trait PaymentView {
    fn state(&self) -> PaymentState;
    fn order_payment_state(&self) -> OrderPaymentState;
    fn credit_allowed(&self) -> Decimal;
}

/// A plain payment record, for callers without their own payment type.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct PaymentSnapshot {
    pub payment: String,
    pub state: PaymentState,
    pub order_payment_state: OrderPaymentState,
    pub credit_allowed: Decimal,
}

impl PaymentView for PaymentSnapshot {
    fn state(&self) -> PaymentState {
        self.state
    }

    fn order_payment_state(&self) -> OrderPaymentState {
        self.order_payment_state
    }

    fn credit_allowed(&self) -> Decimal {
        self.credit_allowed
    }
}

pub fn supported_actions() -> &'static [Action] {
    &[Action::Capture, Action::Void, Action::Credit]
}

pub fn can_capture(payment: &impl PaymentView) -> bool {
    matches!(
        payment.state(),
        PaymentState::Pending | PaymentState::Checkout
    )
}

pub fn can_void(payment: &impl PaymentView) -> bool {
    !matches!(payment.state(), PaymentState::Failed | PaymentState::Void)
}

pub fn can_credit(payment: &impl PaymentView) -> bool {
    payment.state() == PaymentState::Completed
        && payment.order_payment_state() == OrderPaymentState::CreditOwed
        && payment.credit_allowed() > Decimal::ZERO
}

pub fn can_perform(action: Action, payment: &impl PaymentView) -> bool {
    match action {
        Action::Capture => can_capture(payment),
        Action::Void => can_void(payment),
        Action::Credit => can_credit(payment),
    }
}
