use crate::domain::model::{
    Counterparty, CounterpartyId, EstateId, RealEstateObject, RealEstateType, Request, RequestType,
};
use crate::utils::error::{RealtyError, ReferenceTarget, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::{BTreeMap, BTreeSet, HashMap};

pub const DEFAULT_TOP_LIMIT: usize = 5;

/// A counterparty together with how many requests of one type it opened.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientRequestCount<'a> {
    pub counterparty: &'a Counterparty,
    pub count: usize,
}

/// The lowest request price and everyone who asked it.
#[derive(Debug, Clone, PartialEq)]
pub struct MinPriceClients {
    pub price: Decimal,
    pub clients: Vec<String>,
}

/// Read-only query evaluator over borrowed collections.
///
/// Every request a query touches must resolve to an existing counterparty and
/// estate. A dangling reference fails the whole query with
/// [`RealtyError::BrokenReference`]; nothing is skipped.
pub struct QueryEngine<'a> {
    counterparties: HashMap<CounterpartyId, &'a Counterparty>,
    estates: HashMap<EstateId, &'a RealEstateObject>,
    requests: &'a [Request],
}

fn index_by_id<'a, T, F>(collection: &str, items: &'a [T], id_of: F) -> Result<HashMap<u32, &'a T>>
where
    F: Fn(&T) -> u32,
{
    let mut index = HashMap::with_capacity(items.len());
    for item in items {
        let id = id_of(item);
        if index.insert(id, item).is_some() {
            return Err(RealtyError::DuplicateId {
                collection: collection.to_string(),
                id,
            });
        }
    }
    Ok(index)
}

impl<'a> QueryEngine<'a> {
    pub fn new(
        counterparties: &'a [Counterparty],
        estates: &'a [RealEstateObject],
        requests: &'a [Request],
    ) -> Result<Self> {
        Ok(Self {
            counterparties: index_by_id("counterparties", counterparties, |c| c.id)?,
            estates: index_by_id("estates", estates, |e| e.id)?,
            requests,
        })
    }

    pub fn counterparty_of(&self, request: &Request) -> Result<&'a Counterparty> {
        self.counterparties
            .get(&request.counterparty_id)
            .copied()
            .ok_or(RealtyError::BrokenReference {
                request_id: request.id,
                target: ReferenceTarget::Counterparty,
                target_id: request.counterparty_id,
            })
    }

    pub fn estate_of(&self, request: &Request) -> Result<&'a RealEstateObject> {
        self.estates
            .get(&request.estate_id)
            .copied()
            .ok_or(RealtyError::BrokenReference {
                request_id: request.id,
                target: ReferenceTarget::Estate,
                target_id: request.estate_id,
            })
    }

    fn distinct_names<'r, I>(&self, requests: I) -> Result<Vec<String>>
    where
        I: IntoIterator<Item = &'r Request>,
    {
        let mut names = BTreeSet::new();
        for request in requests {
            names.insert(self.counterparty_of(request)?.full_name.as_str());
        }
        Ok(names.into_iter().map(str::to_string).collect())
    }

    /// Distinct names of everyone who opened a sell request within
    /// `[from, to]`, both ends inclusive, compared by calendar day.
    ///
    /// An inverted range is a vacuous query and yields an empty list.
    pub fn sellers_in_period(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<String>> {
        if from > to {
            tracing::warn!(%from, %to, "inverted period, no sellers can match");
            return Ok(Vec::new());
        }

        let sellers = self.distinct_names(self.requests.iter().filter(|r| {
            let day = r.date.date();
            r.request_type == RequestType::Sell && day >= from && day <= to
        }))?;

        tracing::debug!(%from, %to, sellers = sellers.len(), "sellers_in_period");
        Ok(sellers)
    }

    /// Top `limit` counterparties by number of requests of `request_type`.
    ///
    /// Ordered by count descending, then full name ascending, then id.
    pub fn top_clients(
        &self,
        request_type: RequestType,
        limit: usize,
    ) -> Result<Vec<ClientRequestCount<'a>>> {
        if limit == 0 {
            return Err(RealtyError::InvalidArgument {
                field: "limit".to_string(),
                value: limit.to_string(),
                reason: "must be a positive number".to_string(),
            });
        }

        let mut counts: HashMap<CounterpartyId, ClientRequestCount<'a>> = HashMap::new();
        for request in self.requests.iter().filter(|r| r.request_type == request_type) {
            let counterparty = self.counterparty_of(request)?;
            counts
                .entry(counterparty.id)
                .or_insert(ClientRequestCount {
                    counterparty,
                    count: 0,
                })
                .count += 1;
        }

        let mut ranked: Vec<ClientRequestCount<'a>> = counts.into_values().collect();
        ranked.sort_by(|a, b| {
            b.count
                .cmp(&a.count)
                .then_with(|| a.counterparty.full_name.cmp(&b.counterparty.full_name))
                .then_with(|| a.counterparty.id.cmp(&b.counterparty.id))
        });
        ranked.truncate(limit);

        tracing::debug!(%request_type, limit, returned = ranked.len(), "top_clients");
        Ok(ranked)
    }

    /// Number of requests per estate type. Every type is present, zero when
    /// no request references it.
    pub fn request_counts_by_type(&self) -> Result<BTreeMap<RealEstateType, usize>> {
        let mut counts: BTreeMap<RealEstateType, usize> =
            RealEstateType::ALL.into_iter().map(|t| (t, 0)).collect();

        for request in self.requests {
            *counts.entry(self.estate_of(request)?.estate_type).or_insert(0) += 1;
        }

        tracing::debug!(requests = self.requests.len(), "request_counts_by_type");
        Ok(counts)
    }

    /// Clients whose requests carry the lowest price in the collection.
    pub fn min_price_clients(&self) -> Result<MinPriceClients> {
        let price = self
            .requests
            .iter()
            .map(|r| r.price)
            .min()
            .ok_or_else(|| RealtyError::EmptyInput {
                query: "min_price_clients".to_string(),
            })?;

        let clients = self.distinct_names(self.requests.iter().filter(|r| r.price == price))?;

        tracing::debug!(%price, clients = clients.len(), "min_price_clients");
        Ok(MinPriceClients { price, clients })
    }

    /// Distinct names of buyers looking for an estate of `estate_type`,
    /// sorted ascending.
    pub fn clients_seeking(&self, estate_type: RealEstateType) -> Result<Vec<String>> {
        let mut buyers = Vec::new();
        for request in self.requests.iter().filter(|r| r.request_type == RequestType::Buy) {
            if self.estate_of(request)?.estate_type == estate_type {
                buyers.push(request);
            }
        }

        let clients = self.distinct_names(buyers)?;
        tracing::debug!(%estate_type, clients = clients.len(), "clients_seeking");
        Ok(clients)
    }
}
