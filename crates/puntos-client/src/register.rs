//! # Cashier Register
//!
//! The state of the scanner screen: who was scanned, what the ticket says,
//! what the backend last reported, and the status line shown to the cashier.
//!
//! ## Register Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Register Operations                                  │
//! │                                                                         │
//! │  Cashier Action          Register Method          Backend Call          │
//! │  ──────────────          ───────────────          ────────────          │
//! │                                                                         │
//! │  Scan QR ───────────────► scan(raw) ────────────► GET resumen/{id}      │
//! │                           (auto-fills TCK-<ms> reference)               │
//! │                                                                         │
//! │  Type amount/ref/desc ──► set_ticket_* ─────────► (none)                │
//! │                                                                         │
//! │  Edit redeem points ────► set_redemption_points ► (none)                │
//! │  "Use suggested" ───────► use_suggested ────────► (none)                │
//! │                                                                         │
//! │  Accumulate ────────────► accumulate() ─────────► POST acumular-qr      │
//! │                                                   GET resumen/{id}      │
//! │  Redeem ────────────────► redeem() ─────────────► POST canjear-qr       │
//! │                                                   GET resumen/{id}      │
//! │                                                                         │
//! │  History ───────────────► load_history() ───────► GET historial/{id}    │
//! │  Clear ─────────────────► clear() ──────────────► (none)                │
//! │                                                                         │
//! │  NOTE: guards run before any call; a failed guard sends nothing.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Balance Invariant
//! The displayed balance is only ever the last value the backend returned.
//! After every committed movement it is fetched again, never adjusted here.

use chrono::Utc;
use puntos_core::points::suggested_redemption;
use puntos_core::submission::{prepare_accumulation, prepare_redemption};
use puntos_core::{
    AccrualRate, CoreError, CustomerBalance, Money, Movement, ScanResult, TicketContext,
};
use std::fmt;
use tracing::{debug, info, warn};

use crate::api::LoyaltyBackend;
use crate::error::{ClientError, ClientResult};

// =============================================================================
// Notices
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Ok,
    Warn,
    Error,
}

impl fmt::Display for NoticeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NoticeLevel::Ok => write!(f, "OK"),
            NoticeLevel::Warn => write!(f, "WARN"),
            NoticeLevel::Error => write!(f, "ERROR"),
        }
    }
}

/// The status line under the register.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Notice {
            level,
            message: message.into(),
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.level, self.message)
    }
}

#[derive(Debug, Clone, Copy)]
enum Operation {
    Accumulate,
    Redeem,
}

/// Status line for a failed submission.
///
/// The wording of a 409 differs per operation.
fn failure_notice(operation: Operation, err: &ClientError) -> Notice {
    match (operation, err) {
        (Operation::Accumulate, ClientError::Duplicate(_)) => Notice::new(
            NoticeLevel::Warn,
            "This ticket was already accumulated for this customer.",
        ),
        (Operation::Redeem, ClientError::Duplicate(_)) => Notice::new(
            NoticeLevel::Warn,
            "Duplicate movement: this redemption was already recorded.",
        ),
        (_, ClientError::Server { detail: None, .. }) => Notice::new(
            NoticeLevel::Error,
            match operation {
                Operation::Accumulate => "Unexpected error while accumulating.",
                Operation::Redeem => "Unexpected error while redeeming.",
            },
        ),
        (_, other) => Notice::new(NoticeLevel::Error, other.to_string()),
    }
}

// =============================================================================
// Register
// =============================================================================

/// One cashier's scanner session.
///
/// Every operation takes `&mut self`, so at most one request is in flight.
#[derive(Debug)]
pub struct Register<B> {
    backend: B,
    rate: AccrualRate,

    scan: Option<ScanResult>,
    balance: Option<CustomerBalance>,
    ticket: TicketContext,

    /// Operator-entered redemption, used only while `redemption_edited`.
    redemption_override: i64,
    redemption_edited: bool,

    last_movement: Option<Movement>,
    history: Vec<Movement>,
    notice: Option<Notice>,
}

impl<B: LoyaltyBackend> Register<B> {
    pub fn new(backend: B, rate: AccrualRate) -> Self {
        Register {
            backend,
            rate,
            scan: None,
            balance: None,
            ticket: TicketContext::default(),
            redemption_override: 0,
            redemption_edited: false,
            last_movement: None,
            history: Vec::new(),
            notice: None,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn current_scan(&self) -> Option<&ScanResult> {
        self.scan.as_ref()
    }

    /// Customer id of the current scan, if it was valid.
    pub fn customer_id(&self) -> Option<i64> {
        self.scan.as_ref().and_then(|s| s.customer_id)
    }

    /// Last balance the backend returned for the scanned customer.
    pub fn balance(&self) -> Option<&CustomerBalance> {
        self.balance.as_ref()
    }

    pub fn ticket(&self) -> &TicketContext {
        &self.ticket
    }

    pub fn last_movement(&self) -> Option<&Movement> {
        self.last_movement.as_ref()
    }

    pub fn history(&self) -> &[Movement] {
        &self.history
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    // =========================================================================
    // Suggestions
    // =========================================================================

    /// Points the current ticket earns.
    pub fn suggested_accumulation(&self) -> i64 {
        self.rate.points_for(self.ticket.amount)
    }

    /// `min(available, floor(amount))`, or 0 with no balance loaded.
    pub fn suggested_redemption(&self) -> i64 {
        suggested_redemption(self.balance.as_ref().map(|b| b.available), self.ticket.amount)
    }

    /// Points a redemption would submit right now.
    ///
    /// Follows the suggestion until the operator edits it.
    pub fn redemption_points(&self) -> i64 {
        if self.redemption_edited {
            self.redemption_override
        } else {
            self.suggested_redemption()
        }
    }

    pub fn is_redemption_edited(&self) -> bool {
        self.redemption_edited
    }

    // =========================================================================
    // Input
    // =========================================================================

    pub fn set_ticket_amount(&mut self, amount: Money) {
        self.ticket.amount = amount;
    }

    pub fn set_reference(&mut self, reference: impl Into<String>) {
        self.ticket.reference = reference.into();
    }

    pub fn set_description(&mut self, description: Option<String>) {
        self.ticket.description = description;
    }

    /// Operator override of the redemption quantity.
    pub fn set_redemption_points(&mut self, points: i64) {
        self.redemption_override = points;
        self.redemption_edited = true;
    }

    /// Drops the override so the redemption follows the suggestion again.
    pub fn use_suggested(&mut self) {
        self.redemption_edited = false;
        self.redemption_override = 0;
    }

    // =========================================================================
    // Scan
    // =========================================================================

    /// Handles one line from the scanner.
    ///
    /// Always replaces the current scan and drops the old balance and
    /// history. An empty reference is filled with `TCK-<unix millis>`.
    pub async fn scan(&mut self, raw: &str) -> ClientResult<()> {
        let scan = ScanResult::normalize(raw);
        debug!(normalized = %scan.normalized, customer_id = ?scan.customer_id, "Scanned");

        if self.ticket.reference.trim().is_empty() {
            self.ticket.reference = format!("TCK-{}", Utc::now().timestamp_millis());
        }

        self.scan = Some(scan);
        self.history.clear();
        self.load_balance().await
    }

    /// Fetches the balance for the current scan again.
    pub async fn refresh_balance(&mut self) -> ClientResult<()> {
        self.load_balance().await
    }

    async fn load_balance(&mut self) -> ClientResult<()> {
        self.balance = None;
        self.notice = None;

        let customer_id = match self.scan.as_ref() {
            Some(scan) => scan.require_customer(),
            None => Err(CoreError::NoCustomer),
        };
        let customer_id = match customer_id {
            Ok(id) => id,
            Err(e) => {
                self.notice = Some(Notice::new(NoticeLevel::Error, e.to_string()));
                return Err(e.into());
            }
        };

        match self.backend.balance(customer_id).await {
            Ok(balance) => {
                debug!(customer_id, available = balance.available, "Balance loaded");
                self.balance = Some(balance);
                Ok(())
            }
            Err(e) => {
                warn!(customer_id, error = %e, "Balance fetch failed");
                self.notice = Some(Notice::new(
                    NoticeLevel::Error,
                    format!("Could not load the customer's balance: {}", e),
                ));
                Err(e)
            }
        }
    }

    // =========================================================================
    // Submissions
    // =========================================================================

    /// Posts an accumulation for the current ticket.
    ///
    /// Zero points (ticket too small) is rejected before any call.
    pub async fn accumulate(&mut self) -> ClientResult<Movement> {
        self.notice = None;
        self.last_movement = None;

        let request = prepare_accumulation(self.scan.as_ref(), &self.ticket, self.rate);
        let request = match request {
            Ok(request) => request,
            Err(e) => return Err(self.reject(Operation::Accumulate, e.into())),
        };

        match self.backend.accumulate(&request).await {
            Ok(movement) => {
                let message = format!("Points accumulated (+{})", movement.points);
                self.commit(movement, message).await
            }
            Err(e) => Err(self.reject(Operation::Accumulate, e)),
        }
    }

    /// Posts a redemption of [`Self::redemption_points`].
    pub async fn redeem(&mut self) -> ClientResult<Movement> {
        self.notice = None;
        self.last_movement = None;

        let request = prepare_redemption(
            self.scan.as_ref(),
            &self.ticket,
            self.redemption_points(),
            self.balance.as_ref().map(|b| b.available),
        );
        let request = match request {
            Ok(request) => request,
            Err(e) => return Err(self.reject(Operation::Redeem, e.into())),
        };

        match self.backend.redeem(&request).await {
            Ok(movement) => {
                let message = format!("Redemption completed (-{} pts)", movement.points);
                let movement = self.commit(movement, message).await?;
                self.use_suggested();
                Ok(movement)
            }
            Err(e) => Err(self.reject(Operation::Redeem, e)),
        }
    }

    /// Records a committed movement and re-reads the balance.
    ///
    /// The movement is committed even if the re-read fails; that case
    /// leaves no balance on screen and a warning.
    async fn commit(&mut self, movement: Movement, message: String) -> ClientResult<Movement> {
        info!(
            id = movement.id,
            kind = %movement.kind,
            puntos = movement.points,
            reference = ?movement.reference,
            "Movement committed"
        );

        self.ticket.description = None;
        self.last_movement = Some(movement.clone());

        match self.load_balance().await {
            Ok(()) => self.notice = Some(Notice::new(NoticeLevel::Ok, message)),
            Err(e) => {
                self.notice = Some(Notice::new(
                    NoticeLevel::Warn,
                    format!("{}, but the balance could not be refreshed: {}", message, e),
                ));
            }
        }

        Ok(movement)
    }

    fn reject(&mut self, operation: Operation, err: ClientError) -> ClientError {
        let notice = failure_notice(operation, &err);
        if notice.level == NoticeLevel::Warn {
            warn!(?operation, "{}", notice.message);
        } else {
            debug!(?operation, error = %err, "Submission rejected");
        }
        self.notice = Some(notice);
        err
    }

    // =========================================================================
    // History / Reset
    // =========================================================================

    /// Loads the scanned customer's movements, newest first as sent.
    pub async fn load_history(&mut self) -> ClientResult<&[Movement]> {
        self.history.clear();

        let customer_id = match self.scan.as_ref() {
            Some(scan) => scan.require_customer()?,
            None => return Err(CoreError::NoCustomer.into()),
        };

        self.history = self.backend.history(customer_id).await?;
        debug!(customer_id, count = self.history.len(), "History loaded");
        Ok(self.history.as_slice())
    }

    /// Forgets the whole session: scan, ticket, balance, history, status.
    pub fn clear(&mut self) {
        self.scan = None;
        self.balance = None;
        self.ticket = TicketContext::default();
        self.redemption_override = 0;
        self.redemption_edited = false;
        self.last_movement = None;
        self.history.clear();
        self.notice = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use puntos_core::{MovementKind, PointsRequest, ValidationError};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// In-memory backend that counts calls.
    #[derive(Default)]
    struct FakeBackend {
        available: Mutex<i64>,
        fail_next: Mutex<Option<ClientError>>,
        /// Balances the backend reports after each mutation, in order.
        settled: Mutex<VecDeque<i64>>,
        balance_calls: AtomicUsize,
        history_calls: AtomicUsize,
        accumulate_calls: AtomicUsize,
        redeem_calls: AtomicUsize,
        last_request: Mutex<Option<PointsRequest>>,
    }

    impl FakeBackend {
        fn with_balance(available: i64) -> Self {
            FakeBackend {
                available: Mutex::new(available),
                ..Default::default()
            }
        }

        fn fail_next(&self, err: ClientError) {
            *self.fail_next.lock().unwrap() = Some(err);
        }

        fn settle_next_at(&self, available: i64) {
            self.settled.lock().unwrap().push_back(available);
        }

        fn apply(&self, delta: i64) {
            let mut available = self.available.lock().unwrap();
            *available = match self.settled.lock().unwrap().pop_front() {
                Some(settled) => settled,
                None => *available + delta,
            };
        }

        fn take_failure(&self) -> ClientResult<()> {
            match self.fail_next.lock().unwrap().take() {
                Some(err) => Err(err),
                None => Ok(()),
            }
        }

        fn movement(&self, kind: MovementKind, request: &PointsRequest) -> Movement {
            Movement {
                id: 100,
                customer_id: Some(42),
                kind,
                points: request.puntos,
                description: request.descripcion.clone(),
                reference: Some(request.referencia.clone()),
                timestamp: Utc::now(),
            }
        }

        fn calls(counter: &AtomicUsize) -> usize {
            counter.load(Ordering::SeqCst)
        }
    }

    impl LoyaltyBackend for FakeBackend {
        async fn balance(&self, _customer_id: i64) -> ClientResult<CustomerBalance> {
            self.balance_calls.fetch_add(1, Ordering::SeqCst);
            Ok(CustomerBalance {
                customer_name: "Ana".into(),
                accumulated: 0,
                redeemed: 0,
                available: *self.available.lock().unwrap(),
            })
        }

        async fn history(&self, customer_id: i64) -> ClientResult<Vec<Movement>> {
            self.history_calls.fetch_add(1, Ordering::SeqCst);
            let request = PointsRequest {
                qr_data: format!("CLI:{}", customer_id),
                puntos: 5,
                descripcion: None,
                referencia: "F1".into(),
            };
            Ok(vec![self.movement(MovementKind::Accumulated, &request)])
        }

        async fn accumulate(&self, request: &PointsRequest) -> ClientResult<Movement> {
            self.accumulate_calls.fetch_add(1, Ordering::SeqCst);
            self.take_failure()?;
            *self.last_request.lock().unwrap() = Some(request.clone());
            self.apply(request.puntos);
            Ok(self.movement(MovementKind::Accumulated, request))
        }

        async fn redeem(&self, request: &PointsRequest) -> ClientResult<Movement> {
            self.redeem_calls.fetch_add(1, Ordering::SeqCst);
            self.take_failure()?;
            *self.last_request.lock().unwrap() = Some(request.clone());
            self.apply(-request.puntos);
            Ok(self.movement(MovementKind::Redeemed, request))
        }
    }

    fn register(available: i64) -> Register<FakeBackend> {
        Register::new(FakeBackend::with_balance(available), AccrualRate::STANDARD)
    }

    fn amount(s: &str) -> Money {
        s.parse().unwrap()
    }

    #[tokio::test]
    async fn test_scan_loads_balance_and_fills_reference() {
        let mut reg = register(50);
        reg.scan("CLIÑ42\r\n").await.unwrap();

        assert_eq!(reg.customer_id(), Some(42));
        assert_eq!(reg.current_scan().unwrap().normalized, "CLI:42");
        assert_eq!(reg.balance().unwrap().available, 50);
        assert!(reg.ticket().reference.starts_with("TCK-"));
        assert_eq!(FakeBackend::calls(&reg.backend().balance_calls), 1);
    }

    #[tokio::test]
    async fn test_scan_keeps_typed_reference() {
        let mut reg = register(50);
        reg.set_reference("F-778");
        reg.scan("CLI:42").await.unwrap();
        assert_eq!(reg.ticket().reference, "F-778");
    }

    #[tokio::test]
    async fn test_invalid_scan_makes_no_call() {
        let mut reg = register(50);
        let err = reg.scan("HELLO").await.unwrap_err();

        assert!(matches!(err, ClientError::Core(CoreError::InvalidQr { .. })));
        assert_eq!(reg.notice().unwrap().level, NoticeLevel::Error);
        assert!(reg.balance().is_none());
        assert_eq!(FakeBackend::calls(&reg.backend().balance_calls), 0);
    }

    #[tokio::test]
    async fn test_suggestions_follow_balance_and_amount() {
        let mut reg = register(50);
        reg.scan("CLI:42").await.unwrap();

        reg.set_ticket_amount(amount("1500.50"));
        assert_eq!(reg.suggested_accumulation(), 15);
        assert_eq!(reg.suggested_redemption(), 50);

        reg.set_ticket_amount(amount("30"));
        assert_eq!(reg.suggested_redemption(), 30);
        assert_eq!(reg.redemption_points(), 30);
    }

    #[tokio::test]
    async fn test_small_balance_caps_redemption() {
        let mut reg = register(10);
        reg.scan("CLI:42").await.unwrap();
        reg.set_ticket_amount(amount("30"));
        assert_eq!(reg.suggested_redemption(), 10);
    }

    #[tokio::test]
    async fn test_zero_point_accumulation_sends_nothing() {
        let mut reg = register(50);
        reg.scan("CLI:42").await.unwrap();
        reg.set_ticket_amount(amount("0.40"));

        let err = reg.accumulate().await.unwrap_err();
        assert!(matches!(
            err,
            ClientError::Core(CoreError::Validation(ValidationError::MustBePositive { .. }))
        ));
        assert_eq!(FakeBackend::calls(&reg.backend().accumulate_calls), 0);
    }

    #[tokio::test]
    async fn test_accumulate_refetches_balance() {
        let mut reg = register(50);
        reg.scan("CLI:42").await.unwrap();
        reg.set_ticket_amount(amount("1500.50"));
        reg.set_description(Some("Compra mostrador".into()));

        let movement = reg.accumulate().await.unwrap();
        assert_eq!(movement.points, 15);

        // one fetch on scan, one after the mutation
        assert_eq!(FakeBackend::calls(&reg.backend().balance_calls), 2);
        assert_eq!(reg.balance().unwrap().available, 65);
        assert_eq!(reg.notice().unwrap().level, NoticeLevel::Ok);
        assert_eq!(reg.ticket().description, None);
        assert!(reg.ticket().reference.starts_with("TCK-"));
        assert_eq!(reg.last_movement().unwrap().id, 100);

        let sent = reg.backend().last_request.lock().unwrap().clone().unwrap();
        assert_eq!(sent.qr_data, "CLI:42");
        assert_eq!(sent.descripcion.as_deref(), Some("Compra mostrador"));
    }

    #[tokio::test]
    async fn test_duplicate_accumulation_warns_once() {
        let mut reg = register(50);
        reg.scan("CLI:42").await.unwrap();
        reg.set_ticket_amount(amount("500"));
        reg.backend().fail_next(ClientError::Duplicate(None));

        let err = reg.accumulate().await.unwrap_err();
        assert!(matches!(err, ClientError::Duplicate(_)));
        assert!(!err.is_retryable());

        let notice = reg.notice().unwrap();
        assert_eq!(notice.level, NoticeLevel::Warn);
        assert!(notice.message.contains("already accumulated"));
        assert_eq!(FakeBackend::calls(&reg.backend().accumulate_calls), 1);
        // no refetch after a failed mutation
        assert_eq!(FakeBackend::calls(&reg.backend().balance_calls), 1);
        assert_eq!(reg.balance().unwrap().available, 50);
    }

    #[tokio::test]
    async fn test_duplicate_redemption_message() {
        let mut reg = register(50);
        reg.scan("CLI:42").await.unwrap();
        reg.set_ticket_amount(amount("30"));
        reg.backend().fail_next(ClientError::Duplicate(None));

        reg.redeem().await.unwrap_err();
        let notice = reg.notice().unwrap();
        assert_eq!(notice.level, NoticeLevel::Warn);
        assert!(notice.message.starts_with("Duplicate movement"));
        assert_eq!(FakeBackend::calls(&reg.backend().redeem_calls), 1);
    }

    #[tokio::test]
    async fn test_not_found_and_rejected_are_errors() {
        let mut reg = register(50);
        reg.scan("CLI:42").await.unwrap();
        reg.set_ticket_amount(amount("500"));

        reg.backend().fail_next(ClientError::NotFound(None));
        let err = reg.accumulate().await.unwrap_err();
        assert!(matches!(err, ClientError::NotFound(_)));
        assert_eq!(
            reg.notice().unwrap(),
            &Notice::new(NoticeLevel::Error, "Customer not found")
        );
        assert_eq!(FakeBackend::calls(&reg.backend().accumulate_calls), 1);

        reg.backend()
            .fail_next(ClientError::Rejected("Saldo insuficiente".into()));
        let err = reg.redeem().await.unwrap_err();
        assert!(matches!(err, ClientError::Rejected(_)));
        assert_eq!(reg.notice().unwrap().message, "Saldo insuficiente");
        assert_eq!(FakeBackend::calls(&reg.backend().redeem_calls), 1);
        assert!(reg.backend().fail_next.lock().unwrap().is_none());
    }

    #[tokio::test]
    async fn test_balance_shows_backend_value_after_mutation() {
        let mut reg = register(50);
        reg.scan("CLI:42").await.unwrap();
        reg.set_ticket_amount(amount("1500.50"));

        // 50 + 15 would be 65; the backend says otherwise
        reg.backend().settle_next_at(7);
        assert_eq!(reg.accumulate().await.unwrap().points, 15);
        assert_eq!(reg.balance().unwrap().available, 7);

        reg.set_redemption_points(5);
        reg.backend().settle_next_at(999);
        assert_eq!(reg.redeem().await.unwrap().points, 5);
        assert_eq!(reg.balance().unwrap().available, 999);
        assert_eq!(FakeBackend::calls(&reg.backend().balance_calls), 3);
    }

    #[tokio::test]
    async fn test_redemption_override_and_reset() {
        let mut reg = register(50);
        reg.scan("CLI:42").await.unwrap();
        reg.set_ticket_amount(amount("30"));

        reg.set_redemption_points(12);
        assert!(reg.is_redemption_edited());
        assert_eq!(reg.redemption_points(), 12);

        let movement = reg.redeem().await.unwrap();
        assert_eq!(movement.points, 12);
        assert_eq!(reg.balance().unwrap().available, 38);
        assert!(!reg.is_redemption_edited());
        assert_eq!(reg.redemption_points(), 30);

        reg.set_redemption_points(5);
        reg.use_suggested();
        assert_eq!(reg.redemption_points(), 30);
    }

    #[tokio::test]
    async fn test_redemption_over_ceilings_sends_nothing() {
        let mut reg = register(50);
        reg.scan("CLI:42").await.unwrap();
        reg.set_ticket_amount(amount("30"));

        reg.set_redemption_points(31);
        assert!(matches!(
            reg.redeem().await.unwrap_err(),
            ClientError::Core(CoreError::ExceedsTicket { max: 30, .. })
        ));

        reg.set_ticket_amount(amount("100"));
        reg.set_redemption_points(51);
        assert!(matches!(
            reg.redeem().await.unwrap_err(),
            ClientError::Core(CoreError::ExceedsBalance { available: 50, .. })
        ));
        assert_eq!(FakeBackend::calls(&reg.backend().redeem_calls), 0);
    }

    #[tokio::test]
    async fn test_submit_without_scan() {
        let mut reg = register(50);
        reg.set_ticket_amount(amount("100"));
        reg.set_reference("F1");
        assert!(matches!(
            reg.accumulate().await.unwrap_err(),
            ClientError::Core(CoreError::NoCustomer)
        ));
    }

    #[tokio::test]
    async fn test_history_requires_valid_scan() {
        let mut reg = register(50);
        assert!(reg.load_history().await.is_err());

        reg.scan("CLI:42").await.unwrap();
        assert_eq!(reg.load_history().await.unwrap().len(), 1);
        assert_eq!(FakeBackend::calls(&reg.backend().history_calls), 1);

        // a new scan drops the old list
        reg.scan("CLI:43").await.unwrap();
        assert!(reg.history().is_empty());
    }

    #[tokio::test]
    async fn test_clear_resets_everything() {
        let mut reg = register(50);
        reg.scan("CLI:42").await.unwrap();
        reg.set_ticket_amount(amount("30"));
        reg.set_redemption_points(3);

        reg.clear();
        assert!(reg.current_scan().is_none());
        assert!(reg.balance().is_none());
        assert_eq!(reg.ticket(), &TicketContext::default());
        assert!(!reg.is_redemption_edited());
        assert!(reg.notice().is_none());
    }
}
