use crate::domain::model::{
    Counterparty, Dataset, RealEstateObject, RealEstatePurpose, RealEstateType, Request,
    RequestType,
};
use crate::domain::ports::DataProvider;
use crate::utils::error::Result;
use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

/// Built-in reference fixture: ten clients, ten estates, one request each.
#[derive(Debug, Clone, Copy, Default)]
pub struct SeedProvider;

impl SeedProvider {
    pub fn new() -> Self {
        Self
    }

    pub fn dataset() -> Dataset {
        let counterparties = clients();
        let estates = estates();
        let requests = requests();
        Dataset {
            counterparties,
            estates,
            requests,
        }
    }
}

impl DataProvider for SeedProvider {
    fn name(&self) -> &str {
        "seed"
    }

    fn load(&self) -> Result<Dataset> {
        Ok(Self::dataset())
    }
}

fn client(id: u32, full_name: &str, passport_number: &str, phone: &str) -> Counterparty {
    Counterparty {
        id,
        full_name: full_name.to_string(),
        passport_number: passport_number.to_string(),
        phone: phone.to_string(),
    }
}

fn clients() -> Vec<Counterparty> {
    vec![
        client(1, "Ivan Ivanov", "4500 123456", "+7 999 111-22-33"),
        client(2, "Petr Petrov", "4500 654321", "+7 999 444-55-66"),
        client(3, "Sergey Sidorov", "4500 222333", "+7 999 777-88-99"),
        client(4, "Anna Smirnova", "4500 444555", "+7 999 000-11-22"),
        client(5, "Elena Volkova", "4500 666777", "+7 999 333-44-55"),
        client(6, "Dmitry Orlov", "4500 888999", "+7 999 555-66-77"),
        client(7, "Maria Kuznetsova", "4500 101112", "+7 999 888-99-00"),
        client(8, "Alexey Romanov", "4500 131415", "+7 999 222-33-44"),
        client(9, "Natalia Ivanova", "4500 161718", "+7 999 666-77-88"),
        client(10, "Andrey Popov", "4500 192021", "+7 999 999-00-11"),
    ]
}

struct Building {
    floors: u32,
    rooms: u32,
    ceiling_height: f64,
    floor: Option<i32>,
}

fn estate(
    id: u32,
    estate_type: RealEstateType,
    purpose: RealEstatePurpose,
    address: &str,
    area: f64,
    building: Option<Building>,
    has_encumbrances: Option<bool>,
) -> RealEstateObject {
    RealEstateObject {
        id,
        estate_type,
        purpose,
        cadastral_number: format!("77:01:{:04}", id),
        address: address.to_string(),
        area,
        floors: building.as_ref().map(|b| b.floors),
        rooms: building.as_ref().map(|b| b.rooms),
        ceiling_height: building.as_ref().map(|b| b.ceiling_height),
        floor: building.as_ref().and_then(|b| b.floor),
        has_encumbrances,
    }
}

fn building(floors: u32, rooms: u32, ceiling_height: f64, floor: Option<i32>) -> Option<Building> {
    Some(Building {
        floors,
        rooms,
        ceiling_height,
        floor,
    })
}

fn estates() -> Vec<RealEstateObject> {
    use RealEstatePurpose::{Commercial, Residential};
    use RealEstateType::{Apartment, Garage, House, Land, Office};

    vec![
        estate(1, Apartment, Residential, "Moscow, Lenina St. 1", 50.0, building(10, 2, 2.7, Some(5)), None),
        estate(2, House, Residential, "Moscow region, Sosnovaya 3", 120.0, building(2, 4, 3.0, Some(1)), None),
        estate(3, Office, Commercial, "Moscow, Business Center 12", 200.0, building(15, 10, 3.2, Some(7)), None),
        estate(4, Land, Residential, "Moscow region, Greenfield", 600.0, None, None),
        estate(5, Garage, Commercial, "Moscow, Garage Cooperative 21", 25.0, building(1, 1, 2.5, None), None),
        estate(6, Apartment, Residential, "Moscow, Pushkina St. 10", 75.0, building(12, 3, 2.8, Some(9)), None),
        estate(7, House, Residential, "Moscow region, Central St. 55", 200.0, building(3, 6, 3.1, Some(1)), Some(true)),
        estate(8, Office, Commercial, "Moscow, Office Park 8", 300.0, building(20, 15, 3.3, Some(10)), None),
        estate(9, Apartment, Residential, "Moscow, Tverskaya St. 15", 60.0, building(8, 2, 2.6, Some(3)), None),
        estate(10, Land, Commercial, "Moscow region, Industrial Zone", 1500.0, None, Some(true)),
    ]
}

fn midnight(y: i32, m: u32, d: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .expect("fixture dates are valid calendar dates")
}

fn requests() -> Vec<Request> {
    use RequestType::{Buy, Sell};

    // request n links client n with estate n
    let rows: [(RequestType, i64, NaiveDateTime); 10] = [
        (Sell, 8_000_000, midnight(2024, 5, 10)),
        (Buy, 12_500_000, midnight(2024, 6, 15)),
        (Sell, 45_000_000, midnight(2024, 7, 1)),
        (Buy, 3_000_000, midnight(2024, 8, 12)),
        (Sell, 600_000, midnight(2024, 9, 20)),
        (Buy, 10_000_000, midnight(2024, 10, 5)),
        (Sell, 25_000_000, midnight(2024, 11, 11)),
        (Buy, 55_000_000, midnight(2024, 12, 1)),
        (Sell, 9_000_000, midnight(2025, 1, 15)),
        (Buy, 80_000_000, midnight(2025, 2, 20)),
    ];

    rows.into_iter()
        .zip(1u32..)
        .map(|((request_type, price, date), id)| Request {
            id,
            counterparty_id: id,
            estate_id: id,
            request_type,
            price: Decimal::from(price),
            date,
        })
        .collect()
}
