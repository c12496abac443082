//! End-to-end run of the shop scenario through the public API.

use chrono::NaiveDate;
use pantry_core::{Catalog, Money, ProductKind, Rating, RecordParser};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
}

fn review_all(catalog: &mut Catalog, id: u32, reviews: &[(Rating, &str)]) {
    for (rating, comment) in reviews {
        catalog.review_product(id, *rating, comment);
    }
}

#[test]
fn test_three_products_across_locales() {
    let mut catalog = Catalog::for_locale("en-US");

    catalog.create_drink(101, "Tea", Money::from_cents(1199), Rating::NotRated);
    review_all(
        &mut catalog,
        101,
        &[
            (Rating::FourStar, "I don't like the tea pretty much"),
            (Rating::OneStar, "Hate it"),
            (Rating::ThreeStar, "So so"),
            (Rating::OneStar, "Hate it"),
            (Rating::OneStar, "Hate it"),
            (Rating::FiveStar, "Love it"),
        ],
    );
    let tea = catalog.find_product(101).unwrap().clone();
    assert_eq!(tea.rating(), Rating::TwoStar);

    let report = catalog.product_report_on(&tea, today());
    let lines: Vec<&str> = report.lines().collect();
    assert_eq!(lines.len(), 7);
    assert_eq!(lines[0], "Tea, Price: $11.99, Rating: ★★☆☆☆, Best Before: 10/19/26");
    assert_eq!(lines[1], "Review: ★★★★★\tLove it");
    assert_eq!(lines[6], "Review: ★☆☆☆☆\tHate it");

    catalog.change_locale("es-CO");
    catalog.create_drink(102, "Coffee", Money::from_cents(299), Rating::NotRated);
    review_all(
        &mut catalog,
        102,
        &[
            (Rating::FiveStar, "Great"),
            (Rating::FiveStar, "Lovely"),
            (Rating::FiveStar, "Strong"),
            (Rating::FourStar, "Good"),
        ],
    );
    assert_eq!(catalog.find_product(102).unwrap().rating(), Rating::FourStar);
    let coffee = catalog.product_report(102).unwrap();
    assert!(coffee.starts_with("Coffee, Precio: $ 2,99, Calificación: ★★★★☆"));

    // unsupported locale falls back to en-US
    catalog.change_locale("fr-FR");
    catalog.create_food(103, "Cake", Money::from_cents(299), Rating::NotRated, today());
    review_all(
        &mut catalog,
        103,
        &[
            (Rating::FiveStar, "Yummy"),
            (Rating::FourStar, "Nice"),
            (Rating::FourStar, "So so"),
            (Rating::FourStar, "Fine"),
        ],
    );
    let cake = catalog.find_product(103).unwrap().clone();
    assert_eq!(cake.kind(), ProductKind::Food);
    assert!(catalog
        .product_report_on(&cake, today())
        .starts_with("Cake, Price: $2.99, Rating: ★★★★☆, Best Before: 10/19/26"));

    // lunchtime on the cake's best-before day: only the cake is discounted
    let lunch = today().and_hms_opt(12, 0, 0).unwrap();
    let discounts = catalog.discounts_at(lunch);
    assert_eq!(discounts["★★☆☆☆"], "$0.00");
    assert_eq!(discounts["★★★★☆"], "$0.30");

    // evening: both drinks join in
    let evening = today().and_hms_opt(18, 45, 0).unwrap();
    let discounts = catalog.discounts_at(evening);
    assert_eq!(discounts["★★☆☆☆"], "$1.20");
    assert_eq!(discounts["★★★★☆"], "$0.60");

    let listing = catalog.products_report_on(
        today(),
        |p| p.price() > Money::from_cents(200),
        |a, b| {
            a.rating()
                .cmp(&b.rating())
                .then_with(|| a.price().cmp(&b.price()))
        },
    );
    let names: Vec<&str> = listing.lines().map(|l| l.split(',').next().unwrap()).collect();
    assert_eq!(names, vec!["Tea", "Coffee", "Cake"]);
}

#[test]
fn test_parsed_records_feed_the_catalog() {
    let mut catalog = Catalog::for_locale("en-US");
    let parser = RecordParser::default();

    let products = parser.parse_products(
        &mut catalog,
        "D,101,Tea,11.99,2\nF,103,Cake,2.99,0,2026-10-19\nZ,104,Mystery,1.00,1\n",
    );
    assert_eq!(products.accepted, 2);
    assert_eq!(products.rejected, 1);

    let reviews = parser.parse_reviews(
        &mut catalog,
        "101,4,Nice\n1010,2,comment\n1010,Two,comment\n101,1,Weak\n",
    );
    assert_eq!(reviews.accepted, 2);
    assert_eq!(reviews.rejected, 2);

    assert_eq!(catalog.find_product(101).unwrap().rating(), Rating::TwoStar);
    assert!(catalog.find_product(104).is_err());

    // re-parsing an existing id keeps its reviews
    parser.parse_product(&mut catalog, "D,101,Tea again,1.00,5");
    assert_eq!(catalog.reviews(101).unwrap().len(), 2);
    assert_eq!(catalog.find_product(101).unwrap().name(), "Tea");
}
