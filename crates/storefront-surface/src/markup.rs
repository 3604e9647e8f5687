//! Fragment builders
//!
//! Pure markup synthesis from model data. Class and data hooks here are
//! matched by the stylesheet and by [`crate::Surface`] queries, so they must
//! not drift.

use crate::element::Element;
use storefront_model::{FormField, Product, ProductStatus, StatusSummary, Store};

pub(crate) const STORE_LIST: &str = "store-list-content";
pub(crate) const STORE_ITEM: &str = "store-list__item";
pub(crate) const ACTIVE_ITEM: &str = "js-list-item-active";
pub(crate) const DEFAULT_PANE: &str = "default-data";
pub(crate) const DETAILS_PANE: &str = "store-details";
pub(crate) const TABLE_CONTENT: &str = "store-details-table-content";
pub(crate) const TABLE_ITEM: &str = "store-details-table__item";
pub(crate) const ROW_STATUS: &str = "data-tableitem-status";
pub(crate) const ROW_CROSS: &str = "details-list-item__cross";
pub(crate) const HIDE: &str = "hide";
pub(crate) const SHOW: &str = "show";
pub(crate) const SEARCH_INPUT: &str = "search-form__input";
pub(crate) const SUMMARY_TOTAL: &str = "products-status-filter-amount__number";
pub(crate) const WRONG_DATA: &str = "wrong-data";
pub(crate) const WRONG_INPUT: &str = "wrong-input";

const MAX_STARS: u8 = 5;

/// Highlight class of a status affordance
#[must_use]
pub fn highlight_class(status: ProductStatus) -> &'static str {
    match status {
        ProductStatus::Ok => "products-background-OK",
        ProductStatus::Storage => "products-background-Storage",
        ProductStatus::OutOfStock => "products-background-Stock",
    }
}

/// Class of the element holding the per-status count
#[must_use]
pub fn summary_count_class(status: ProductStatus) -> &'static str {
    match status {
        ProductStatus::Ok => "js-status-OK",
        ProductStatus::Storage => "js-status-storage",
        ProductStatus::OutOfStock => "js-status-outStock",
    }
}

fn affordance_class(status: ProductStatus) -> &'static str {
    match status {
        ProductStatus::Ok => "products-status-done",
        ProductStatus::Storage => "products-status-storage",
        ProductStatus::OutOfStock => "products-status-stock",
    }
}

fn affordance_picture(status: ProductStatus) -> &'static str {
    match status {
        ProductStatus::Ok => "./img/store-done.png",
        ProductStatus::Storage => "./img/store-storage.png",
        ProductStatus::OutOfStock => "./img/store-stock.png",
    }
}

/// Contact spans: (class hook, label, value)
pub(crate) fn contact_fields(store: &Store) -> [(&'static str, &'static str, String); 5] {
    [
        ("js-contacts-Email", "Email: ", store.email.clone()),
        ("js-contacts-phoneNumber", "Phone Number: ", store.phone_number.clone()),
        ("js-contacts-address", "Address: ", store.address.clone()),
        ("js-contacts-established", "Established Date: ", store.established.clone()),
        ("js-contacts-floorArea", "Floor Area: ", store.floor_area_text()),
    ]
}

/// Initial document: store list, empty details placeholder and the four
/// hidden modals
pub(crate) fn document() -> Element {
    Element::new("body").children([
        Element::new("main").class("main").children([
            store_list_section(),
            Element::new("section")
                .class(DEFAULT_PANE)
                .child(Element::new("p").text("No store selected")),
        ]),
        store_modal(),
        product_modal(),
        confirmation_modal("modal-confirmation-store", "modal-store-confirmation", "store"),
        confirmation_modal("modal-confirmation-detail", "modal-detail-confirmation", "product"),
    ])
}

fn store_list_section() -> Element {
    Element::new("section").class("store-list").children([
        Element::new("header")
            .class("store-list-header")
            .child(
                Element::new("div")
                    .class("store-list-header__title")
                    .child(Element::new("h2").text("Stores")),
            ),
        Element::new("form").class("search-form").children([
            Element::new("input")
                .class(SEARCH_INPUT)
                .attr("type", "text")
                .attr("value", ""),
            Element::new("button").class("btn-search").text("Search"),
            Element::new("button").class("btn-clear").text("Clear"),
        ]),
        Element::new("ul").class(STORE_LIST),
        Element::new("footer").class("store-list__footer").child(
            Element::new("button")
                .class("btn-create btn-store-create")
                .text("Create"),
        ),
    ])
}

/// One entry of the store list
pub(crate) fn store_item(store: &Store) -> Element {
    Element::new("li")
        .class(STORE_ITEM)
        .attr("data-id", store.id)
        .children([
            Element::new("div").class("store-list-item-info").children([
                Element::new("div")
                    .class("store-list-item-info__title")
                    .child(Element::new("h2").text(store.name.as_str())),
                Element::new("div")
                    .class("store-list-item-info__address")
                    .child(Element::new("span").text(store.address.as_str())),
            ]),
            Element::new("div").class("store-list-item__square").children([
                Element::new("span")
                    .class("square__length")
                    .text(store.floor_area_text()),
                Element::new("span").class("square__unit").text("sq.m"),
            ]),
        ])
}

/// Full details pane content for a freshly constructed pane
pub(crate) fn details_content(store: &Store, products: &[Product]) -> Vec<Element> {
    vec![
        Element::new("div")
            .class("store-list-header__title details__title")
            .child(Element::new("h2").text("Store Details")),
        contacts(store),
        status_filter(&StatusSummary::from_products(products)),
        Element::new("div")
            .class("store-details-table__title")
            .child(Element::new("h2").text("Products")),
        table_header(),
        Element::new("div")
            .class(TABLE_CONTENT)
            .children(products.iter().map(product_row)),
        details_footer(),
    ]
}

fn contacts(store: &Store) -> Element {
    let [email, phone, address, established, floor_area] = contact_fields(store);
    Element::new("div").class("store-details__contacts").children([
        Element::new("div")
            .class("store-details__contacts__item")
            .children([contact_line(email), contact_line(phone), contact_line(address)]),
        Element::new("div")
            .class("store-details__contacts__item")
            .children([contact_line(established), contact_line(floor_area)]),
    ])
}

fn contact_line((class, label, value): (&'static str, &'static str, String)) -> Element {
    Element::new("p")
        .class("store-details__contacts__item__text")
        .children([
            Element::new("strong").text(label),
            Element::new("span").class(class).text(value),
        ])
}

fn status_filter(summary: &StatusSummary) -> Element {
    let all = Element::new("div")
        .class("products-status-filter-amount")
        .attr("data-status", "all")
        .children([
            Element::new("h2")
                .class(SUMMARY_TOTAL)
                .text(summary.total().to_string()),
            Element::new("p")
                .class("products-status-filter-amount__subtext")
                .text("all"),
        ]);

    Element::new("section")
        .class("store-details__products-status-filter")
        .child(all)
        .children(
            ProductStatus::ALL
                .into_iter()
                .map(|status| status_affordance(status, summary.count(status))),
        )
}

fn status_affordance(status: ProductStatus, count: usize) -> Element {
    Element::new("div")
        .class("products-status-filter__item")
        .children([
            Element::new("div")
                .class("products-status-filter__item-wrapper")
                .children([
                    Element::new("div")
                        .class("products-status-filter-img")
                        .class(affordance_class(status))
                        .attr("data-status", status.as_str())
                        .child(
                            Element::new("img")
                                .class("products-status-filter__picture")
                                .attr("src", affordance_picture(status))
                                .attr("alt", ""),
                        ),
                    Element::new("div")
                        .class("products-status-filter__position")
                        .child(Element::new("p").text(status.label())),
                ]),
            Element::new("div")
                .class("products-status-filter__part")
                .child(
                    Element::new("p")
                        .class(summary_count_class(status))
                        .text(count.to_string()),
                ),
        ])
}

fn table_header() -> Element {
    const COLUMNS: [&str; 7] = [
        "Name",
        "Price",
        "Specs",
        "SupplierInfo",
        "Country of origin",
        "Prod. company",
        "Rating",
    ];
    Element::new("div")
        .class("store-details-table-header")
        .children(COLUMNS.iter().map(|column| {
            let cell = Element::new("div").class("store-details-list-header__item");
            let cell = if *column == "Price" {
                cell.class("store-details-list-cap__item-outside")
            } else {
                cell
            };
            cell.child(Element::new("span").text(*column))
        }))
}

/// One product row; hidden state is applied separately
pub(crate) fn product_row(product: &Product) -> Element {
    let text_cell = |text: &str| {
        Element::new("div")
            .class("details-item")
            .child(Element::new("p").text(text))
    };

    Element::new("div")
        .class(TABLE_ITEM)
        .attr(ROW_STATUS, product.status.as_str())
        .children([
            Element::new("div")
                .class("store-details-table__item-column details-item")
                .children([
                    Element::new("p")
                        .class("store-details-table__item-head__name")
                        .text(product.name.as_str()),
                    Element::new("p")
                        .class("store-details-table__item-head__id")
                        .text(product.id.to_string()),
                ]),
            Element::new("div")
                .class("store-details-table__item-price details-item")
                .child(Element::new("p").children([
                    Element::new("span")
                        .class("table-price-item__currency")
                        .text(product.price.to_string()),
                    Element::new("span").text("USD"),
                ])),
            text_cell(&product.specs),
            text_cell(&product.supplier_info),
            text_cell(&product.made_in),
            text_cell(&product.production_company_name),
            rating_cell(product.rating),
            Element::new("div")
                .class("store-details-table-item__arrow")
                .child(
                    Element::new("img")
                        .attr("src", "./img/right-arrow .png")
                        .attr("alt", ""),
                ),
            Element::new("div")
                .class(ROW_CROSS)
                .attr("data-id", product.id)
                .child(
                    Element::new("img")
                        .class("img-cross")
                        .attr("src", "./img/cross.png")
                        .attr("alt", ""),
                ),
        ])
}

fn rating_cell(rating: u8) -> Element {
    let filled = rating.min(MAX_STARS);
    Element::new("div")
        .class("details-item js-rating")
        .children((0..MAX_STARS).map(|i| {
            let src = if i < filled {
                "./img/fullStar.png"
            } else {
                "./img/emptyStar.png"
            };
            Element::new("img")
                .class("list-item__star")
                .attr("src", src)
                .attr("alt", "")
        }))
}

fn details_footer() -> Element {
    Element::new("footer")
        .class("store-list__footer details-list__footer")
        .children([
            Element::new("button")
                .class("btn-create btn-details-create")
                .child(
                    Element::new("img")
                        .class("img-create")
                        .attr("src", "./img/footer-create.png")
                        .attr("alt", ""),
                )
                .text("Create"),
            Element::new("button").class("btn-store-delete").text("Delete"),
        ])
}

fn form_item(label: &str, field: Element) -> Element {
    Element::new("div")
        .class("modal-form__item")
        .children([Element::new("label").text(label), field])
}

fn input(class: &str) -> Element {
    Element::new("input")
        .class(class)
        .attr("type", "text")
        .attr("value", "")
}

fn textarea(class: &str) -> Element {
    Element::new("textarea").class(class).attr("value", "")
}

fn store_modal() -> Element {
    Element::new("div").class("modal-create-stores hide").child(
        Element::new("form").class("modal-store-form").children([
            Element::new("h2").text("Create new store"),
            form_item("Name", input("modal-store-name-inp")),
            form_item("Email", input(FormField::Email.input_class())),
            form_item("Phone Number", input("modal-store-phoneNunber-inp")),
            form_item("Address", input("modal-store-address-inp")),
            form_item("Established Date", input("modal-store-established-inp")),
            form_item("Floor Area", input(FormField::FloorArea.input_class())),
            Element::new("div").class("modal-buttons").children([
                Element::new("button").class("modal-store-btn-create").text("Create"),
                Element::new("button").class("modal-store-btn-cancel").text("Cancel"),
            ]),
        ]),
    )
}

fn product_modal() -> Element {
    let status_select = Element::new("select")
        .class(FormField::Status.input_class())
        .attr("id", FormField::Status.input_class())
        .attr("value", ProductStatus::Ok.as_str())
        .children(ProductStatus::ALL.into_iter().map(|status| {
            Element::new("option")
                .attr("value", status.as_str())
                .text(status.label())
        }));

    Element::new("div").class("modal-create-details hide").child(
        Element::new("form").class("modal-details-form").children([
            Element::new("h2").text("Create new product"),
            form_item("Name", input("modal-detail-name-inp")),
            form_item("Price", input(FormField::Price.input_class())),
            form_item("Specs", textarea("modal-detail-specs-inp")),
            form_item("Rating", input(FormField::Rating.input_class())),
            form_item("Supplier Info", textarea("modal-detail-supplierInfo-inp")),
            form_item("Made In", input("modal-detail-madePlace-inp")),
            form_item("Production Company", input("modal-detail-companyName-inp")),
            form_item("Status", status_select),
            Element::new("div").class("modal-buttons").children([
                Element::new("button").class("modal-details-btn-create").text("Create"),
                Element::new("button").class("modal-details-btn-cancel").text("Cancel"),
            ]),
        ]),
    )
}

fn confirmation_modal(window: &str, prefix: &str, noun: &str) -> Element {
    Element::new("div").class(window).class(HIDE).child(
        Element::new("div").class("modal-confirmation").children([
            Element::new("p").text(format!("Are you sure you want to delete this {noun}?")),
            Element::new("button")
                .class(&format!("{prefix}__btn-OK"))
                .text("OK"),
            Element::new("button")
                .class(&format!("{prefix}__btn-cancel"))
                .text("Cancel"),
        ]),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_model::{ProductId, StoreId};

    fn product(rating: u8) -> Product {
        Product {
            id: ProductId(7),
            store_id: StoreId(1),
            name: "Chair".into(),
            price: 20.0,
            specs: String::new(),
            supplier_info: String::new(),
            made_in: String::new(),
            production_company_name: String::new(),
            rating,
            status: ProductStatus::OutOfStock,
        }
    }

    fn stars(row: &Element) -> Vec<&str> {
        row.all_by_class("list-item__star")
            .iter()
            .filter_map(|s| s.get_attr("src"))
            .collect()
    }

    #[test]
    fn row_carries_status_and_cross_id() {
        let row = product_row(&product(3));
        assert_eq!(row.get_attr(ROW_STATUS), Some("OUT_OF_STOCK"));
        let cross = row.by_class(ROW_CROSS).unwrap();
        assert_eq!(cross.get_attr("data-id"), Some("7"));
        assert!(cross.by_class("img-cross").is_some());
    }

    #[test]
    fn rating_renders_five_stars() {
        let row = product_row(&product(3));
        let srcs = stars(&row);
        assert_eq!(srcs.len(), 5);
        assert_eq!(srcs.iter().filter(|s| s.contains("fullStar")).count(), 3);

        let over = product_row(&product(9));
        assert!(stars(&over).iter().all(|s| s.contains("fullStar")));
    }

    #[test]
    fn document_starts_with_hidden_modals() {
        let doc = document();
        for class in [
            "modal-create-stores",
            "modal-create-details",
            "modal-confirmation-store",
            "modal-confirmation-detail",
        ] {
            assert!(doc.by_class(class).unwrap().has_class(HIDE), "{class}");
        }
        assert!(doc.by_class(DEFAULT_PANE).is_some());
        assert!(doc.by_class(DETAILS_PANE).is_none());
    }

    #[test]
    fn every_form_field_has_an_input() {
        let doc = document();
        for field in FormField::ALL {
            assert!(doc.by_class(field.input_class()).is_some(), "{field}");
        }
    }
}
