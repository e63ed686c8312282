use crate::app::report::{QueryReport, TopClientRow};
use crate::core::snapshot::Snapshot;
use crate::domain::model::{RealEstateType, RequestType};
use crate::domain::ports::QueryDefaults;
use crate::utils::error::{RealtyError, Result};
use chrono::NaiveDate;

/// A query request as issued by a front end. Absent parameters fall back to
/// [`QueryDefaults`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    Sellers {
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    },
    TopClients {
        request_type: RequestType,
        limit: Option<usize>,
    },
    CountsByType,
    MinPrice,
    Seekers {
        estate_type: RealEstateType,
    },
    Summary,
}

fn required_date(field: &str, value: Option<NaiveDate>) -> Result<NaiveDate> {
    value.ok_or_else(|| RealtyError::InvalidArgument {
        field: field.to_string(),
        value: String::new(),
        reason: "no value given and no default period configured".to_string(),
    })
}

pub fn run_query(snapshot: &Snapshot, query: &Query, defaults: &dyn QueryDefaults) -> Result<QueryReport> {
    let engine = snapshot.engine()?;
    tracing::debug!(?query, "running query");

    let report = match query {
        Query::Sellers { from, to } => {
            let period = defaults.period();
            let from = required_date("from", from.or(period.map(|p| p.0)))?;
            let to = required_date("to", to.or(period.map(|p| p.1)))?;
            QueryReport::Sellers {
                from,
                to,
                sellers: engine.sellers_in_period(from, to)?,
            }
        }
        Query::TopClients { request_type, limit } => {
            let limit = limit.unwrap_or_else(|| defaults.top_limit());
            let clients = engine
                .top_clients(*request_type, limit)?
                .iter()
                .map(TopClientRow::from)
                .collect();
            QueryReport::TopClients {
                request_type: *request_type,
                limit,
                clients,
            }
        }
        Query::CountsByType => {
            let counts = engine.request_counts_by_type()?;
            let total = counts.values().sum();
            QueryReport::CountsByType { counts, total }
        }
        Query::MinPrice => {
            let result = engine.min_price_clients()?;
            QueryReport::MinPrice {
                price: result.price,
                clients: result.clients,
            }
        }
        Query::Seekers { estate_type } => QueryReport::Seekers {
            estate_type: *estate_type,
            clients: engine.clients_seeking(*estate_type)?,
        },
        Query::Summary => QueryReport::Summary(snapshot.summary()),
    };

    Ok(report)
}
