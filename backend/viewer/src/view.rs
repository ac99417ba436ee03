use heroes::Hero;
use tracing::debug;

use crate::api::Outcome;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Loading,
    Idle,
    Searching,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    List,
    Search(String),
}

/// Issued per request, newest one wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub ticket: Ticket,
    pub query: Query,
}

#[derive(Debug, Clone)]
pub struct HeroView {
    phase: Phase,
    keyword: String,
    results: Vec<Hero>,
    last_failure: Option<String>,
    role_filter: Option<String>,
    selected: Option<Hero>,
    modal_open: bool,
    generation: u64,
}

impl Default for HeroView {
    fn default() -> Self {
        Self::new()
    }
}

impl HeroView {
    pub fn new() -> Self {
        Self {
            phase: Phase::Loading,
            keyword: String::new(),
            results: Vec::new(),
            last_failure: None,
            role_filter: None,
            selected: None,
            modal_open: false,
            generation: 0,
        }
    }

    pub fn mount(&mut self) -> Request {
        self.list_request()
    }

    pub fn set_keyword(&mut self, keyword: impl Into<String>) {
        self.keyword = keyword.into();
    }

    /// Blank keywords reset to the full list.
    pub fn submit(&mut self) -> Request {
        if self.keyword.trim().is_empty() {
            return self.list_request();
        }

        self.phase = Phase::Searching;

        Request {
            ticket: self.next_ticket(),
            query: Query::Search(self.keyword.clone()),
        }
    }

    pub fn browse_all(&mut self) -> Request {
        self.list_request()
    }

    /// Returns false when a newer request has been issued since `ticket`.
    pub fn apply(&mut self, ticket: Ticket, outcome: Outcome) -> bool {
        if ticket.0 != self.generation {
            debug!("Dropping stale response {} (latest {})", ticket.0, self.generation);
            return false;
        }

        match outcome {
            Outcome::Heroes(heroes) => {
                self.results = heroes;
                self.last_failure = None;
            }
            Outcome::Failed(reason) => {
                self.results.clear();
                self.last_failure = Some(reason);
            }
        }

        self.phase = Phase::Idle;
        true
    }

    pub fn select(&mut self, hero: Hero) {
        self.selected = Some(hero);
        self.modal_open = true;
    }

    pub fn close_modal(&mut self) {
        self.modal_open = false;
    }

    pub fn set_role_filter(&mut self, role: Option<String>) {
        self.role_filter = role.filter(|r| !r.trim().is_empty());
    }

    /// Results after the role filter.
    pub fn visible(&self) -> Vec<&Hero> {
        self.results
            .iter()
            .filter(|hero| match &self.role_filter {
                Some(role) => hero.role_label().trim().eq_ignore_ascii_case(role.trim()),
                None => true,
            })
            .collect()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    pub fn results(&self) -> &[Hero] {
        &self.results
    }

    pub fn last_failure(&self) -> Option<&str> {
        self.last_failure.as_deref()
    }

    pub fn role_filter(&self) -> Option<&str> {
        self.role_filter.as_deref()
    }

    pub fn selected(&self) -> Option<&Hero> {
        self.selected.as_ref()
    }

    pub fn is_modal_open(&self) -> bool {
        self.modal_open
    }

    fn list_request(&mut self) -> Request {
        self.phase = Phase::Loading;

        Request {
            ticket: self.next_ticket(),
            query: Query::List,
        }
    }

    fn next_ticket(&mut self) -> Ticket {
        self.generation += 1;
        Ticket(self.generation)
    }
}
