//! Display data for the two dashboards.
//!
//! Everything here is canned; only the wallet figures come from the actor.

use crate::types::{Actor, PayRange, ServiceCategory};
use std::fmt;

/// Progress of a request or job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestStatus {
    Pending,
    InProgress,
    Completed,
}

impl RequestStatus {
    pub fn label(self) -> &'static str {
        match self {
            RequestStatus::Pending => "Pending",
            RequestStatus::InProgress => "In Progress",
            RequestStatus::Completed => "Completed",
        }
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A service tile on the customer dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeaturedService {
    pub name: &'static str,
    pub category: ServiceCategory,
    pub price: PayRange,
}

/// A row of the customer's recent requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecentRequest {
    pub id: u32,
    pub service: &'static str,
    pub status: RequestStatus,
    /// Assigned helper, or a placeholder while pending.
    pub helper: &'static str,
    pub time: &'static str,
}

/// A row of the helper's recent jobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecentJob {
    pub id: u32,
    pub service: &'static str,
    pub client: &'static str,
    pub amount: u32,
    pub status: RequestStatus,
    pub date: &'static str,
}

const FEATURED: [FeaturedService; 6] = [
    FeaturedService {
        name: "Home Cleaning",
        category: ServiceCategory::Professional,
        price: PayRange::new(300, 800),
    },
    FeaturedService {
        name: "Plumbing",
        category: ServiceCategory::Professional,
        price: PayRange::new(500, 1500),
    },
    FeaturedService {
        name: "Electrical Work",
        category: ServiceCategory::Professional,
        price: PayRange::new(400, 1200),
    },
    FeaturedService {
        name: "Hair Cutting",
        category: ServiceCategory::Professional,
        price: PayRange::new(200, 600),
    },
    FeaturedService {
        name: "Car Washing",
        category: ServiceCategory::Casual,
        price: PayRange::new(200, 500),
    },
    FeaturedService {
        name: "Gardening",
        category: ServiceCategory::Casual,
        price: PayRange::new(300, 800),
    },
];

const RECENT_REQUESTS: [RecentRequest; 3] = [
    RecentRequest {
        id: 1,
        service: "Home Cleaning",
        status: RequestStatus::InProgress,
        helper: "Priya Sharma",
        time: "2 hours ago",
    },
    RecentRequest {
        id: 2,
        service: "Plumbing",
        status: RequestStatus::Completed,
        helper: "Raj Kumar",
        time: "1 day ago",
    },
    RecentRequest {
        id: 3,
        service: "Electrical Work",
        status: RequestStatus::Pending,
        helper: "Waiting...",
        time: "30 minutes ago",
    },
];

const RECENT_JOBS: [RecentJob; 3] = [
    RecentJob {
        id: 1,
        service: "Plumbing Repair",
        client: "Priya Singh",
        amount: 800,
        status: RequestStatus::Completed,
        date: "2 hours ago",
    },
    RecentJob {
        id: 2,
        service: "House Cleaning",
        client: "Rajesh Kumar",
        amount: 600,
        status: RequestStatus::InProgress,
        date: "1 hour ago",
    },
    RecentJob {
        id: 3,
        service: "Electrical Fix",
        client: "Anita Sharma",
        amount: 1200,
        status: RequestStatus::Pending,
        date: "30 min ago",
    },
];

const DEFAULT_CUSTOMER_WALLET: u64 = 500;
const DEFAULT_TOTAL_EARNINGS: u64 = 15420;

/// Customer dashboard contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerDashboard {
    pub greeting: String,
    pub wallet_balance: u64,
    pub featured: &'static [FeaturedService],
    pub recent_requests: &'static [RecentRequest],
}

impl CustomerDashboard {
    /// Build for `actor`; an empty wallet shows the default balance.
    pub fn for_actor(actor: &Actor) -> Self {
        let wallet_balance = match actor.wallet_balance {
            0 => DEFAULT_CUSTOMER_WALLET,
            n => n,
        };
        Self {
            greeting: format!("Welcome back, {}!", actor.name),
            wallet_balance,
            featured: &FEATURED,
            recent_requests: &RECENT_REQUESTS,
        }
    }
}

/// Helper performance figures.
#[derive(Debug, Clone, PartialEq)]
pub struct HelperStats {
    pub total_earnings: u64,
    pub monthly_earnings: u64,
    pub completed_jobs: u32,
    pub rating: f32,
    pub response_time: &'static str,
}

/// Helper dashboard contents.
#[derive(Debug, Clone, PartialEq)]
pub struct HelperDashboard {
    pub greeting: String,
    pub headline: String,
    pub stats: HelperStats,
    pub recent_jobs: &'static [RecentJob],
}

impl HelperDashboard {
    pub fn for_actor(actor: &Actor) -> Self {
        let total_earnings = match actor.wallet_balance {
            0 => DEFAULT_TOTAL_EARNINGS,
            n => n,
        };
        Self {
            greeting: format!("Welcome back, {}!", actor.name),
            headline: actor.headline(),
            stats: HelperStats {
                total_earnings,
                monthly_earnings: total_earnings * 6 / 10,
                completed_jobs: 127,
                rating: 4.8,
                response_time: "5 min",
            },
            recent_jobs: &RECENT_JOBS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Role;

    fn actor(role: Role, wallet: u64) -> Actor {
        Actor {
            id: "1".into(),
            name: "John Doe".into(),
            email: "john@example.com".into(),
            phone: String::new(),
            role,
            profession: Some("Plumber".into()),
            address: None,
            wallet_balance: wallet,
        }
    }

    #[test]
    fn test_customer_wallet_fallback() {
        assert_eq!(CustomerDashboard::for_actor(&actor(Role::Customer, 0)).wallet_balance, 500);
        assert_eq!(CustomerDashboard::for_actor(&actor(Role::Customer, 1500)).wallet_balance, 1500);
    }

    #[test]
    fn test_helper_stats() {
        let board = HelperDashboard::for_actor(&actor(Role::ProfessionalHelper, 0));
        assert_eq!(board.stats.total_earnings, 15420);
        assert_eq!(board.stats.monthly_earnings, 9252);
        assert_eq!(board.headline, "Professional Plumber");

        let board = HelperDashboard::for_actor(&actor(Role::CasualHelper, 1000));
        assert_eq!(board.stats.monthly_earnings, 600);
        assert_eq!(board.recent_jobs.len(), 3);
    }
}
