// Filter form state.
// Company selector, search text, recency selector, and which control has focus.

use crate::data::{CompanyFilter, FilterCriteria, RecencyBucket};

/// Control that receives key input on the Problems tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    Company,
    #[default]
    Search,
    Recency,
    Results,
}

impl Focus {
    pub fn next(&self) -> Self {
        match self {
            Focus::Company => Focus::Search,
            Focus::Search => Focus::Recency,
            Focus::Recency => Focus::Results,
            Focus::Results => Focus::Company,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            Focus::Company => Focus::Results,
            Focus::Search => Focus::Company,
            Focus::Recency => Focus::Search,
            Focus::Results => Focus::Recency,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct FilterForm {
    pub focus: Focus,
    /// Selectable company names, sorted; "All" is implied before them.
    companies: Vec<String>,
    /// 0 selects "All", `i` selects `companies[i - 1]`.
    company_index: usize,
    pub query: String,
    pub recency: RecencyBucket,
}

impl FilterForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the company options, keeping the current pick if it still exists.
    pub fn set_companies(&mut self, companies: Vec<String>) {
        let selected = match self.company() {
            CompanyFilter::Named(name) => companies.iter().position(|c| *c == name),
            CompanyFilter::All => None,
        };
        self.companies = companies;
        self.company_index = selected.map_or(0, |i| i + 1);
    }

    /// Number of options in the company selector, "All" included.
    pub fn company_option_count(&self) -> usize {
        self.companies.len() + 1
    }

    pub fn company(&self) -> CompanyFilter {
        match self.company_index {
            0 => CompanyFilter::All,
            i => self
                .companies
                .get(i - 1)
                .cloned()
                .map_or(CompanyFilter::All, CompanyFilter::Named),
        }
    }

    /// 1-based position of the selected company among the options.
    pub fn company_position(&self) -> usize {
        self.company_index + 1
    }

    pub fn next_company(&mut self) {
        self.company_index = (self.company_index + 1) % self.company_option_count();
    }

    pub fn prev_company(&mut self) {
        let count = self.company_option_count();
        self.company_index = (self.company_index + count - 1) % count;
    }

    pub fn next_recency(&mut self) {
        self.recency = self.recency.next();
    }

    pub fn prev_recency(&mut self) {
        self.recency = self.recency.prev();
    }

    pub fn push_char(&mut self, c: char) {
        self.query.push(c);
    }

    /// Remove the last character. Returns false when the query was empty.
    pub fn pop_char(&mut self) -> bool {
        self.query.pop().is_some()
    }

    /// Clear the query. Returns false when it was already empty.
    pub fn clear_query(&mut self) -> bool {
        let changed = !self.query.is_empty();
        self.query.clear();
        changed
    }

    /// Criteria for the current form values.
    pub fn criteria(&self) -> FilterCriteria {
        FilterCriteria {
            company: self.company(),
            query: self.query.clone(),
            recency: self.recency,
        }
    }
}
