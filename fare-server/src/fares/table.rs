//! Price tables for standard fares, period passes and bus fare bands.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use tracing::trace;

use crate::domain::{Mode, PaymentMeans, Price, TicketType, ZoneCode};

/// Prices of one ticket slice, by zone.
type ZonePrices = BTreeMap<ZoneCode, Price>;

/// (mode → payment means → ticket type → zone) → price.
type StandardPrices = BTreeMap<Mode, BTreeMap<PaymentMeans, BTreeMap<TicketType, ZonePrices>>>;

/// Fare band → (ticket type, payment means) → price.
type BandPrices = BTreeMap<ZoneCode, BTreeMap<(TicketType, Option<PaymentMeans>), Price>>;

/// The full key of a fare row, for error reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FareKey {
    Standard {
        mode: Mode,
        payment_means: PaymentMeans,
        ticket_type: TicketType,
        zone: ZoneCode,
    },
    Period {
        ticket_type: TicketType,
        zone: ZoneCode,
    },
    Band {
        payment_means: Option<PaymentMeans>,
        ticket_type: TicketType,
        band: ZoneCode,
    },
}

impl fmt::Display for FareKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FareKey::Standard {
                mode,
                payment_means,
                ticket_type,
                zone,
            } => write!(f, "{mode}/{payment_means}/{ticket_type}/{zone}"),
            FareKey::Period { ticket_type, zone } => write!(f, "period/{ticket_type}/{zone}"),
            FareKey::Band {
                payment_means,
                ticket_type,
                band,
            } => match payment_means {
                Some(p) => write!(f, "band/{p}/{ticket_type}/{band}"),
                None => write!(f, "band/{ticket_type}/{band}"),
            },
        }
    }
}

/// Two rows define the same fare with different prices.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("duplicate fare definition for {key}: {existing} vs {conflicting}")]
pub struct DuplicateFareDefinition {
    pub key: FareKey,
    pub existing: Price,
    pub conflicting: Price,
}

/// No fare row exists for a zone in the requested slice.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("no fare defined for zone {zone}")]
pub struct PricingGap {
    pub zone: ZoneCode,
}

/// One eligible way to pay for a bus fare band.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FareOption {
    pub payment_means: Option<PaymentMeans>,
    pub ticket_type: TicketType,
    pub price: Price,
}

/// Read-only price tables.
///
/// The three tables are kept apart: standard lookups never read period
/// rows and vice versa.
#[derive(Debug, Clone, Default)]
pub struct FareTable {
    standard: StandardPrices,
    period: BTreeMap<TicketType, ZonePrices>,
    bands: BandPrices,
}

impl FareTable {
    /// Create an empty fare table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a standard fare.
    ///
    /// Returns `Ok(false)` if the identical row was already present.
    pub fn insert_standard(
        &mut self,
        mode: Mode,
        payment_means: PaymentMeans,
        ticket_type: TicketType,
        zone: ZoneCode,
        price: Price,
    ) -> Result<bool, DuplicateFareDefinition> {
        let slice = self
            .standard
            .entry(mode)
            .or_default()
            .entry(payment_means.clone())
            .or_default()
            .entry(ticket_type.clone())
            .or_default();

        insert_price(slice, zone.clone(), price, || FareKey::Standard {
            mode,
            payment_means,
            ticket_type,
            zone,
        })
    }

    /// Add a period-pass fare.
    pub fn insert_period(
        &mut self,
        ticket_type: TicketType,
        zone: ZoneCode,
        price: Price,
    ) -> Result<bool, DuplicateFareDefinition> {
        let slice = self.period.entry(ticket_type.clone()).or_default();

        insert_price(slice, zone.clone(), price, || FareKey::Period {
            ticket_type,
            zone,
        })
    }

    /// Add a bus fare-band fare.
    pub fn insert_band(
        &mut self,
        payment_means: Option<PaymentMeans>,
        ticket_type: TicketType,
        band: ZoneCode,
        price: Price,
    ) -> Result<bool, DuplicateFareDefinition> {
        let slice = self.bands.entry(band.clone()).or_default();
        let key = (ticket_type.clone(), payment_means.clone());

        insert_price(slice, key, price, || FareKey::Band {
            payment_means,
            ticket_type,
            band,
        })
    }

    /// Price of a standard fare.
    pub fn standard_price(
        &self,
        mode: Mode,
        payment_means: &PaymentMeans,
        ticket_type: &TicketType,
        zone: &ZoneCode,
    ) -> Result<Price, PricingGap> {
        self.standard_slice(mode, payment_means, ticket_type)
            .and_then(|slice| slice.get(zone))
            .copied()
            .ok_or_else(|| PricingGap { zone: zone.clone() })
    }

    /// Price of a rail period pass.
    pub fn period_price(&self, ticket_type: &TicketType, zone: &ZoneCode) -> Result<Price, PricingGap> {
        self.period
            .get(ticket_type)
            .and_then(|slice| slice.get(zone))
            .copied()
            .ok_or_else(|| PricingGap { zone: zone.clone() })
    }

    /// Every eligible way to pay for a fare band, cheapest first.
    ///
    /// Ties are broken by ticket type, then payment means. An empty result
    /// is a pricing gap.
    pub fn band_options(
        &self,
        band: &ZoneCode,
        eligible: &BTreeSet<TicketType>,
    ) -> Vec<FareOption> {
        let mut options: Vec<FareOption> = self
            .bands
            .get(band)
            .into_iter()
            .flatten()
            .filter(|((ticket, _), _)| eligible.contains(ticket))
            .map(|((ticket, payment), price)| FareOption {
                payment_means: payment.clone(),
                ticket_type: ticket.clone(),
                price: *price,
            })
            .collect();

        options.sort_by(|a, b| {
            a.price
                .cmp(&b.price)
                .then_with(|| a.ticket_type.cmp(&b.ticket_type))
                .then_with(|| a.payment_means.cmp(&b.payment_means))
        });

        trace!(%band, options = options.len(), "fare band options");
        options
    }

    /// All (zone, price) rows of a standard slice, in zone order.
    pub fn standard_zones(
        &self,
        mode: Mode,
        payment_means: &PaymentMeans,
        ticket_type: &TicketType,
    ) -> Vec<(&ZoneCode, Price)> {
        self.standard_slice(mode, payment_means, ticket_type)
            .into_iter()
            .flatten()
            .map(|(zone, price)| (zone, *price))
            .collect()
    }

    /// All (zone, price) rows of a period-pass slice, in zone order.
    pub fn period_zones(&self, ticket_type: &TicketType) -> Vec<(&ZoneCode, Price)> {
        self.period
            .get(ticket_type)
            .into_iter()
            .flatten()
            .map(|(zone, price)| (zone, *price))
            .collect()
    }

    /// All fare bands, in band order.
    pub fn bands(&self) -> impl Iterator<Item = &ZoneCode> {
        self.bands.keys()
    }

    /// Payment means with standard fares for a mode, sorted.
    pub fn payment_means(&self, mode: Mode) -> Vec<&PaymentMeans> {
        self.standard
            .get(&mode)
            .map(|by_payment| by_payment.keys().collect())
            .unwrap_or_default()
    }

    /// Ticket types sold through a payment means for a mode, sorted.
    pub fn ticket_types(&self, mode: Mode, payment_means: &PaymentMeans) -> Vec<&TicketType> {
        self.standard
            .get(&mode)
            .and_then(|by_payment| by_payment.get(payment_means))
            .map(|by_ticket| by_ticket.keys().collect())
            .unwrap_or_default()
    }

    /// Period-pass ticket types, sorted.
    pub fn period_ticket_types(&self) -> Vec<&TicketType> {
        self.period.keys().collect()
    }

    /// Ticket types appearing in the fare-band table, sorted.
    pub fn band_ticket_types(&self) -> BTreeSet<&TicketType> {
        self.bands
            .values()
            .flat_map(|rows| rows.keys().map(|(ticket, _)| ticket))
            .collect()
    }

    /// Every zone priced by any table of a mode.
    pub fn priced_zones(&self, mode: Mode) -> BTreeSet<&ZoneCode> {
        let mut zones: BTreeSet<&ZoneCode> = self
            .standard
            .get(&mode)
            .into_iter()
            .flat_map(|by_payment| by_payment.values())
            .flat_map(|by_ticket| by_ticket.values())
            .flat_map(|slice| slice.keys())
            .collect();

        match mode {
            Mode::Rail => zones.extend(self.period.values().flat_map(|slice| slice.keys())),
            Mode::Bus => zones.extend(self.bands.keys()),
        }
        zones
    }

    /// Number of rows across all three tables.
    pub fn len(&self) -> usize {
        let standard: usize = self
            .standard
            .values()
            .flat_map(|by_payment| by_payment.values())
            .flat_map(|by_ticket| by_ticket.values())
            .map(BTreeMap::len)
            .sum();
        let period: usize = self.period.values().map(BTreeMap::len).sum();
        let bands: usize = self.bands.values().map(BTreeMap::len).sum();
        standard + period + bands
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn standard_slice(
        &self,
        mode: Mode,
        payment_means: &PaymentMeans,
        ticket_type: &TicketType,
    ) -> Option<&ZonePrices> {
        self.standard
            .get(&mode)
            .and_then(|by_payment| by_payment.get(payment_means))
            .and_then(|by_ticket| by_ticket.get(ticket_type))
    }
}

/// Insert a price, tolerating an identical row and rejecting a conflicting one.
fn insert_price<K: Ord>(
    slice: &mut BTreeMap<K, Price>,
    key: K,
    price: Price,
    describe: impl FnOnce() -> FareKey,
) -> Result<bool, DuplicateFareDefinition> {
    match slice.get(&key) {
        Some(existing) if *existing == price => Ok(false),
        Some(existing) => Err(DuplicateFareDefinition {
            key: describe(),
            existing: *existing,
            conflicting: price,
        }),
        None => {
            slice.insert(key, price);
            Ok(true)
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Band options contain every eligible row, ascending by price
        #[test]
        fn band_options_sorted_no_omission(
            rows in prop::collection::btree_map(
                (prop::sample::select(vec!["Adult", "Young Adult", "Child"]),
                 prop::sample::select(vec!["Leap", "Cash", "Card"])),
                0u64..1000,
                0..9,
            )
        ) {
            let mut table = FareTable::new();
            let band = ZoneCode::parse("1").unwrap();
            for ((ticket, payment), units) in &rows {
                table.insert_band(
                    Some(PaymentMeans::parse(payment).unwrap()),
                    TicketType::parse(ticket).unwrap(),
                    band.clone(),
                    Price::from_minor_units(*units),
                ).unwrap();
            }

            let eligible: BTreeSet<_> = ["Adult", "Young Adult"]
                .into_iter()
                .map(|t| TicketType::parse(t).unwrap())
                .collect();
            let options = table.band_options(&band, &eligible);

            let expected = rows.keys().filter(|(t, _)| *t != "Child").count();
            prop_assert_eq!(options.len(), expected);
            prop_assert!(options.windows(2).all(|w| w[0].price <= w[1].price));
        }
    }
}
