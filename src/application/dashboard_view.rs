// Dashboard view - Care profile form state and the tips/plan query lifecycle
use crate::application::coach_gateway::{CoachGateway, FetchPolicy, GatewayError};
use crate::domain::care_profile::{BabyStage, CareProfile};
use crate::domain::dashboard::{CarePlan, DashboardData, Tip};
use tokio::sync::watch;

/// One issued dashboard query. Only the ticket with the latest generation
/// may update the view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryTicket {
    pub generation: u64,
    pub profile: CareProfile,
    pub policy: FetchPolicy,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardState {
    Loading,
    Loaded(DashboardData),
    LoadedEmpty { care_plan: Option<CarePlan> },
}

pub struct DashboardView {
    profile: CareProfile,
    generation: u64,
    state: DashboardState,
    revision: watch::Sender<u64>,
}

impl DashboardView {
    /// Create the view and the initial query for `profile`
    pub fn mount(profile: CareProfile) -> (Self, QueryTicket) {
        let (revision, _) = watch::channel(0);
        let view = Self {
            profile,
            generation: 0,
            state: DashboardState::Loading,
            revision,
        };
        let ticket = view.ticket(FetchPolicy::CacheFirst);
        (view, ticket)
    }

    /// Receiver bumped on every state replacement
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    pub fn profile(&self) -> &CareProfile {
        &self.profile
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state == DashboardState::Loading
    }

    /// Tips to render; empty while a query is in flight
    pub fn tips(&self) -> &[Tip] {
        match &self.state {
            DashboardState::Loaded(data) => &data.daily_tips,
            _ => &[],
        }
    }

    pub fn care_plan(&self) -> Option<&CarePlan> {
        match &self.state {
            DashboardState::Loaded(data) => data.care_plan.as_ref(),
            DashboardState::LoadedEmpty { care_plan } => care_plan.as_ref(),
            DashboardState::Loading => None,
        }
    }

    /// The "no tips" message is only shown once loading has settled
    pub fn shows_empty_fallback(&self) -> bool {
        !self.is_loading() && self.tips().is_empty()
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> Option<QueryTicket> {
        let next = self.profile.with_name(name);
        self.replace_profile(next)
    }

    pub fn set_age_weeks(&mut self, weeks: u32) -> Option<QueryTicket> {
        let next = self.profile.with_age_weeks(weeks);
        self.replace_profile(next)
    }

    pub fn set_stage(&mut self, stage: BabyStage) -> Option<QueryTicket> {
        let next = self.profile.with_stage(stage);
        self.replace_profile(next)
    }

    pub fn toggle_focus(&mut self, value: &str) -> Option<QueryTicket> {
        let next = self.profile.with_focus_toggled(value);
        self.replace_profile(next)
    }

    /// Swap in a new profile. An equal profile keeps the current query.
    pub fn replace_profile(&mut self, next: CareProfile) -> Option<QueryTicket> {
        if next == self.profile {
            return None;
        }
        self.profile = next;
        Some(self.issue(FetchPolicy::CacheFirst))
    }

    /// Re-run the query for the current profile; disabled while loading
    pub fn refresh(&mut self) -> Option<QueryTicket> {
        if self.is_loading() {
            return None;
        }
        Some(self.issue(FetchPolicy::NetworkOnly))
    }

    /// Apply a query result. Returns `false` when the ticket was superseded.
    pub fn complete(&mut self, ticket: &QueryTicket, result: Result<DashboardData, GatewayError>) -> bool {
        if ticket.generation != self.generation {
            tracing::debug!(
                ticket = ticket.generation,
                current = self.generation,
                "Ignoring superseded dashboard response"
            );
            return false;
        }

        self.state = match result {
            Ok(data) if data.daily_tips.is_empty() => DashboardState::LoadedEmpty {
                care_plan: data.care_plan,
            },
            Ok(data) => DashboardState::Loaded(data),
            Err(e) => {
                tracing::warn!("Dashboard query failed: {}", e);
                DashboardState::LoadedEmpty { care_plan: None }
            }
        };
        self.notify();
        true
    }

    /// Execute `ticket` against `gateway` and apply the result
    pub async fn run(&mut self, ticket: QueryTicket, gateway: &dyn CoachGateway) -> bool {
        let result = gateway.dashboard(&ticket.profile, ticket.policy).await;
        self.complete(&ticket, result)
    }

    fn issue(&mut self, policy: FetchPolicy) -> QueryTicket {
        self.generation += 1;
        self.state = DashboardState::Loading;
        self.notify();
        self.ticket(policy)
    }

    fn ticket(&self, policy: FetchPolicy) -> QueryTicket {
        QueryTicket {
            generation: self.generation,
            profile: self.profile.clone(),
            policy,
        }
    }

    fn notify(&self) {
        self.revision.send_modify(|revision| *revision += 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tip(id: &str) -> Tip {
        Tip {
            id: id.to_string(),
            title: format!("title {}", id),
            description: "desc".to_string(),
            category: "sleep".to_string(),
        }
    }

    fn plan() -> CarePlan {
        CarePlan {
            summary: "summary".to_string(),
            feeding_focus: "feed".to_string(),
            sleep_focus: "sleep".to_string(),
            play_focus: "play".to_string(),
            development_focus: "dev".to_string(),
            reminders: vec!["r".to_string()],
        }
    }

    #[test]
    fn test_mount_starts_loading_with_cache_first_ticket() {
        let (view, ticket) = DashboardView::mount(CareProfile::default());

        assert!(view.is_loading());
        assert!(view.tips().is_empty());
        assert!(view.care_plan().is_none());
        assert!(!view.shows_empty_fallback());
        assert_eq!(ticket.policy, FetchPolicy::CacheFirst);
        assert_eq!(ticket.profile, CareProfile::default());
    }

    #[test]
    fn test_complete_with_tips_and_plan() {
        let (mut view, ticket) = DashboardView::mount(CareProfile::default());

        assert!(view.complete(&ticket, Ok(DashboardData::new(vec![tip("1")], Some(plan())))));
        assert_eq!(view.tips().len(), 1);
        assert_eq!(view.care_plan(), Some(&plan()));
        assert!(!view.shows_empty_fallback());
    }

    #[test]
    fn test_empty_tips_settle_in_loaded_empty() {
        let (mut view, ticket) = DashboardView::mount(CareProfile::default());

        view.complete(&ticket, Ok(DashboardData::new(vec![], Some(plan()))));
        assert_eq!(view.state(), &DashboardState::LoadedEmpty { care_plan: Some(plan()) });
        assert!(view.shows_empty_fallback());
    }

    #[test]
    fn test_edit_supersedes_in_flight_query() {
        let (mut view, first) = DashboardView::mount(CareProfile::default());
        let second = view.set_stage(BabyStage::Toddler).unwrap();

        assert!(!view.complete(&first, Ok(DashboardData::new(vec![tip("old")], None))));
        assert!(view.is_loading());

        assert!(view.complete(&second, Ok(DashboardData::new(vec![tip("new")], None))));
        assert_eq!(view.tips()[0].id, "new");
        assert_eq!(second.profile.baby_stage, BabyStage::Toddler);
    }

    #[test]
    fn test_unchanged_profile_issues_no_query() {
        let (mut view, _) = DashboardView::mount(CareProfile::default());
        assert!(view.set_name("豆豆").is_none());
        assert!(view.set_age_weeks(20).is_none());
    }

    #[test]
    fn test_refresh_disabled_while_loading() {
        let (mut view, ticket) = DashboardView::mount(CareProfile::default());
        assert!(view.refresh().is_none());

        view.complete(&ticket, Ok(DashboardData::new(vec![tip("1")], None)));
        let refresh = view.refresh().unwrap();

        assert_eq!(refresh.policy, FetchPolicy::NetworkOnly);
        assert_eq!(refresh.profile, CareProfile::default());
        assert!(view.is_loading());
        assert!(view.tips().is_empty());
        assert!(!view.shows_empty_fallback());
    }

    #[test]
    fn test_query_error_settles_without_data() {
        let (mut view, ticket) = DashboardView::mount(CareProfile::default());

        view.complete(&ticket, Err(GatewayError::GraphQl(vec!["boom".to_string()])));
        assert_eq!(view.state(), &DashboardState::LoadedEmpty { care_plan: None });
        assert!(view.shows_empty_fallback());
    }

    #[test]
    fn test_every_transition_notifies_subscribers() {
        let (mut view, ticket) = DashboardView::mount(CareProfile::default());
        let mut rx = view.subscribe();
        assert!(!rx.has_changed().unwrap());

        view.complete(&ticket, Ok(DashboardData::default()));
        assert!(rx.has_changed().unwrap());
        let _ = rx.borrow_and_update();

        view.toggle_focus("feeding");
        assert!(rx.has_changed().unwrap());
    }
}
