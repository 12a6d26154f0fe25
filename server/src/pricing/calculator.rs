//! Price calculation over a composed service detail.

use crate::db::models::ServiceDetail;
use rust_decimal::{Decimal, RoundingStrategy};

/// Sum every line item attached to the service, then apply the discount.
///
/// Each item contributes its unit price once; counts describe contents
/// (flowers in a bouquet, portions of a dish), not multipliers. The result
/// is exact and unrounded.
pub fn compute_price(detail: &ServiceDetail) -> Decimal {
    let mut total = Decimal::ZERO;

    for flowers in &detail.flowers {
        total += flowers.price;
    }
    for establishment in &detail.establishments {
        for dish in &establishment.dishes {
            total += dish.price;
        }
    }
    for taxi in &detail.taxis {
        total += taxi.price;
    }
    for decoration in &detail.decorations {
        total += decoration.price;
    }

    // Discount is held in 0..=100 at write time; clamp anyway so a bad
    // record can never produce a negative price.
    let discount = Decimal::from(detail.service.discount.min(100));
    total - total * discount / Decimal::ONE_HUNDRED
}

/// Round an exact price to 2 decimals for presentation
pub fn display_price(price: Decimal) -> Decimal {
    price.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::{
        Decoration, EstablishmentWithDishes, Flowers, Service, ServiceDetail, Taxi,
    };
    use chrono::Utc;
    use surrealdb::RecordId;

    fn dec(mantissa: i64, scale: u32) -> Decimal {
        Decimal::new(mantissa, scale)
    }

    fn service(discount: u32) -> Service {
        Service {
            id: None,
            name: "Gala".into(),
            description: None,
            photo: None,
            discount,
            date_from: None,
            date_to: None,
            comment: None,
            is_active: true,
            publish: Utc::now(),
        }
    }

    fn detail(discount: u32) -> ServiceDetail {
        ServiceDetail {
            service: service(discount),
            flowers: vec![],
            establishments: vec![],
            taxis: vec![],
            decorations: vec![],
            price: Decimal::ZERO,
        }
    }

    fn sid() -> RecordId {
        RecordId::from_table_key("service", "t")
    }

    fn flowers(price: Decimal) -> Flowers {
        Flowers {
            id: None,
            service: sid(),
            name: "Roses".into(),
            description: None,
            photo: None,
            count: Some(12),
            price,
            comment: None,
            is_active: true,
            publish: Utc::now(),
        }
    }

    fn taxi(price: Decimal) -> Taxi {
        Taxi {
            id: None,
            service: sid(),
            boarding_address: "A".into(),
            dropoff_address: "B".into(),
            date_time: Utc::now(),
            price,
            comment: None,
            is_active: true,
            publish: Utc::now(),
        }
    }

    fn decoration(price: Decimal) -> Decoration {
        Decoration {
            id: None,
            service: sid(),
            name: "Arch".into(),
            description: None,
            photo: None,
            price,
            comment: None,
            is_active: true,
            publish: Utc::now(),
        }
    }

    #[test]
    fn empty_service_is_free() {
        assert_eq!(compute_price(&detail(0)), Decimal::ZERO);
        assert_eq!(compute_price(&detail(100)), Decimal::ZERO);
    }

    #[test]
    fn sums_every_collection() {
        let mut d = detail(0);
        d.flowers.push(flowers(dec(2550, 2)));
        d.taxis.push(taxi(dec(1500, 2)));
        d.decorations.push(decoration(dec(10000, 2)));
        assert_eq!(compute_price(&d), dec(14050, 2));
    }

    #[test]
    fn dishes_counted_once_per_item() {
        use crate::db::models::{Dish, Establishment};
        let est = Establishment {
            id: None,
            service: sid(),
            name: "Cafe".into(),
            description: None,
            photo: None,
            address: "St 1".into(),
            comment: None,
            city: None,
            is_active: true,
            publish: Utc::now(),
            start_date: Utc::now(),
            end_date: None,
            total_tables: 4,
            opening_time: "10:00".into(),
            closing_time: "22:00".into(),
        };
        let dish = Dish {
            id: None,
            establishment: RecordId::from_table_key("establishment", "t"),
            name: "Paella".into(),
            description: None,
            photo: None,
            count: 3,
            price: dec(1200, 2),
            comment: None,
            is_active: true,
            publish: Utc::now(),
        };
        let mut d = detail(0);
        d.establishments.push(EstablishmentWithDishes {
            establishment: est,
            dishes: vec![dish.clone(), dish],
        });
        // two dishes, count does not multiply
        assert_eq!(compute_price(&d), dec(2400, 2));
    }

    #[test]
    fn discount_is_exact_until_display() {
        let mut d = detail(33);
        d.flowers.push(flowers(dec(1000, 2)));
        let exact = compute_price(&d);
        assert_eq!(exact, dec(67, 1));
        assert_eq!(display_price(exact), dec(670, 2));

        let mut odd = detail(25);
        odd.flowers.push(flowers(dec(10, 2)));
        let exact = compute_price(&odd);
        assert_eq!(exact, dec(75, 3));
        assert_eq!(display_price(exact), dec(8, 2));
    }

    #[test]
    fn full_discount_never_goes_negative() {
        let mut d = detail(100);
        d.flowers.push(flowers(dec(9999, 2)));
        assert_eq!(compute_price(&d), Decimal::ZERO);
    }
}
