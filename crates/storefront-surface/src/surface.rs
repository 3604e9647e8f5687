//! The rendered document and its render/query operations
//!
//! Render operations write markup synthesized from model data. Queries read
//! hooks back (active marker, row statuses, highlights) so callers and tests
//! can observe what a user would see. The controller never takes decisions
//! from these queries.

use crate::element::Element;
use crate::error::{Result, SurfaceError};
use crate::markup::{
    self, ACTIVE_ITEM, DEFAULT_PANE, DETAILS_PANE, HIDE, ROW_CROSS, ROW_STATUS, SEARCH_INPUT,
    SHOW, STORE_ITEM, STORE_LIST, SUMMARY_TOTAL, TABLE_CONTENT, TABLE_ITEM, WRONG_DATA,
    WRONG_INPUT,
};
use storefront_model::{
    FormField, Product, ProductForm, ProductId, ProductStatus, StatusFilter, StatusSummary, Store,
    StoreForm, StoreId,
};

/// The four modal windows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modal {
    /// Create-store form
    CreateStore,
    /// Create-product form
    CreateProduct,
    /// Store delete confirmation
    ConfirmStoreDelete,
    /// Product delete confirmation
    ConfirmProductDelete,
}

impl Modal {
    /// Every modal
    pub const ALL: [Modal; 4] = [
        Self::CreateStore,
        Self::CreateProduct,
        Self::ConfirmStoreDelete,
        Self::ConfirmProductDelete,
    ];

    /// Class of the modal window element
    #[inline]
    #[must_use]
    pub fn window_class(self) -> &'static str {
        match self {
            Self::CreateStore => "modal-create-stores",
            Self::CreateProduct => "modal-create-details",
            Self::ConfirmStoreDelete => "modal-confirmation-store",
            Self::ConfirmProductDelete => "modal-confirmation-detail",
        }
    }

    /// Class of the form inside the window, if it has one
    #[inline]
    #[must_use]
    pub fn form_class(self) -> Option<&'static str> {
        match self {
            Self::CreateStore => Some("modal-store-form"),
            Self::CreateProduct => Some("modal-details-form"),
            Self::ConfirmStoreDelete | Self::ConfirmProductDelete => None,
        }
    }
}

/// Rendered document root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Surface {
    root: Element,
}

impl Default for Surface {
    fn default() -> Self {
        Self::new()
    }
}

impl Surface {
    /// Initial document: empty store list, no details pane, modals hidden
    #[must_use]
    pub fn new() -> Self {
        Self {
            root: markup::document(),
        }
    }

    /// Document root
    #[inline]
    #[must_use]
    pub fn root(&self) -> &Element {
        &self.root
    }

    fn require(&mut self, class: &'static str) -> Result<&mut Element> {
        self.root
            .by_class_mut(class)
            .ok_or(SurfaceError::MissingElement(class))
    }

    fn pane_mut(&mut self) -> Result<&mut Element> {
        self.root
            .by_class_mut(DETAILS_PANE)
            .ok_or(SurfaceError::NoDetailsPane)
    }

    // ----- store list -----

    /// Replace the store list with one entry per store
    pub fn render_store_list(&mut self, stores: &[Store]) -> Result<()> {
        let list = self.require(STORE_LIST)?;
        list.replace_children(stores.iter().map(markup::store_item).collect());
        Ok(())
    }

    /// Ids of the listed stores, in list order
    #[must_use]
    pub fn store_list_ids(&self) -> Vec<StoreId> {
        self.root
            .all_by_class(STORE_ITEM)
            .iter()
            .filter_map(|item| item.get_attr("data-id")?.parse().ok())
            .collect()
    }

    /// Move the active marker to the entry for `id`
    ///
    /// The marker is removed from every entry first. Returns whether the
    /// entry was found.
    pub fn mark_active_store(&mut self, id: StoreId) -> bool {
        self.clear_active_store();
        let id = id.to_string();
        let mut found = false;
        self.root.for_each_mut(
            &|e| e.has_class(STORE_ITEM) && e.get_attr("data-id") == Some(id.as_str()),
            &mut |e| {
                e.add_class(ACTIVE_ITEM);
                found = true;
            },
        );
        found
    }

    /// Remove the active marker from every entry
    pub fn clear_active_store(&mut self) {
        self.root
            .for_each_mut(&|e| e.has_class(STORE_ITEM), &mut |e| e.remove_class(ACTIVE_ITEM));
    }

    /// Id of the entry carrying the active marker
    #[must_use]
    pub fn active_store_id(&self) -> Option<StoreId> {
        self.root
            .find(&|e| e.has_class(STORE_ITEM) && e.has_class(ACTIVE_ITEM))?
            .get_attr("data-id")?
            .parse()
            .ok()
    }

    /// Number of entries carrying the active marker
    #[must_use]
    pub fn active_marker_count(&self) -> usize {
        self.root
            .find_all(&|e| e.has_class(STORE_ITEM) && e.has_class(ACTIVE_ITEM))
            .len()
    }

    // ----- details pane -----

    /// Whether the details pane has been constructed
    #[must_use]
    pub fn details_pane_exists(&self) -> bool {
        self.root.by_class(DETAILS_PANE).is_some()
    }

    /// Turn the placeholder into the details pane and fill it
    ///
    /// Rebuilds the content when the pane already exists.
    pub fn construct_details_pane(&mut self, store: &Store, products: &[Product]) -> Result<()> {
        let pane = self
            .root
            .find_mut(&|e| e.has_class(DEFAULT_PANE) || e.has_class(DETAILS_PANE))
            .ok_or(SurfaceError::MissingElement(DEFAULT_PANE))?;
        pane.remove_class(DEFAULT_PANE);
        pane.remove_class(HIDE);
        pane.add_class(DETAILS_PANE);
        pane.replace_children(markup::details_content(store, products));
        Ok(())
    }

    /// Replace the product rows; every row starts visible
    pub fn render_product_rows(&mut self, products: &[Product]) -> Result<()> {
        let pane = self.pane_mut()?;
        let table = pane
            .by_class_mut(TABLE_CONTENT)
            .ok_or(SurfaceError::MissingElement(TABLE_CONTENT))?;
        table.replace_children(products.iter().map(markup::product_row).collect());
        Ok(())
    }

    /// Rewrite the status summary counts
    pub fn update_status_summary(&mut self, summary: &StatusSummary) -> Result<()> {
        let pane = self.pane_mut()?;
        pane.by_class_mut(SUMMARY_TOTAL)
            .ok_or(SurfaceError::MissingElement(SUMMARY_TOTAL))?
            .set_text(summary.total().to_string());
        for status in ProductStatus::ALL {
            let class = markup::summary_count_class(status);
            pane.by_class_mut(class)
                .ok_or(SurfaceError::MissingElement(class))?
                .set_text(summary.count(status).to_string());
        }
        Ok(())
    }

    /// Status summary as currently rendered
    #[must_use]
    pub fn status_summary(&self) -> Option<StatusSummary> {
        let pane = self.root.by_class(DETAILS_PANE)?;
        let count = |status: ProductStatus| -> Option<usize> {
            pane.by_class(markup::summary_count_class(status))?
                .text_content()?
                .parse()
                .ok()
        };
        Some(StatusSummary {
            ok: count(ProductStatus::Ok)?,
            storage: count(ProductStatus::Storage)?,
            out_of_stock: count(ProductStatus::OutOfStock)?,
        })
    }

    /// Rewrite the contact lines for `store`
    pub fn update_contacts(&mut self, store: &Store) -> Result<()> {
        let pane = self.pane_mut()?;
        for (class, _, value) in markup::contact_fields(store) {
            pane.by_class_mut(class)
                .ok_or(SurfaceError::MissingElement(class))?
                .set_text(value);
        }
        Ok(())
    }

    /// Text of a contact line, by class hook
    #[must_use]
    pub fn contact_text(&self, class: &str) -> Option<&str> {
        self.root.by_class(DETAILS_PANE)?.by_class(class)?.text_content()
    }

    /// Highlight the affordance for `status` and only that one
    pub fn highlight_status(&mut self, status: ProductStatus) -> Result<()> {
        let pane = self.pane_mut()?;
        for other in ProductStatus::ALL {
            let affordance = pane
                .by_attr_mut("data-status", other.as_str())
                .ok_or(SurfaceError::MissingElement("products-status-filter-img"))?;
            if other == status {
                affordance.add_class(markup::highlight_class(other));
            } else {
                affordance.remove_class(markup::highlight_class(other));
            }
        }
        Ok(())
    }

    /// Remove the highlight from every status affordance
    pub fn clear_status_highlight(&mut self) -> Result<()> {
        let pane = self.pane_mut()?;
        for status in ProductStatus::ALL {
            if let Some(affordance) = pane.by_attr_mut("data-status", status.as_str()) {
                affordance.remove_class(markup::highlight_class(status));
            }
        }
        Ok(())
    }

    /// Statuses whose affordance carries the highlight
    #[must_use]
    pub fn highlighted_statuses(&self) -> Vec<ProductStatus> {
        let Some(pane) = self.root.by_class(DETAILS_PANE) else {
            return Vec::new();
        };
        ProductStatus::ALL
            .into_iter()
            .filter(|status| {
                pane.by_attr("data-status", status.as_str())
                    .is_some_and(|e| e.has_class(markup::highlight_class(*status)))
            })
            .collect()
    }

    /// Hide rows not matching `filter`, reveal the rest; rows are never removed
    pub fn show_rows(&mut self, filter: StatusFilter) -> Result<()> {
        let pane = self.pane_mut()?;
        pane.for_each_mut(&|e| e.has_class(TABLE_ITEM), &mut |row| {
            let visible = match filter {
                StatusFilter::All => true,
                StatusFilter::Only(_) => row
                    .get_attr(ROW_STATUS)
                    .and_then(|s| s.parse::<ProductStatus>().ok())
                    .is_some_and(|status| filter.matches(status)),
            };
            if visible {
                row.remove_class(HIDE);
            } else {
                row.add_class(HIDE);
            }
        });
        Ok(())
    }

    /// Every row with its product id and status, in table order
    #[must_use]
    pub fn row_statuses(&self) -> Vec<(ProductId, ProductStatus)> {
        self.rows()
            .into_iter()
            .filter_map(|row| Some((row_id(row)?, row.get_attr(ROW_STATUS)?.parse::<ProductStatus>().ok()?)))
            .collect()
    }

    /// Ids of rows not carrying the hidden marker
    #[must_use]
    pub fn visible_row_ids(&self) -> Vec<ProductId> {
        self.rows()
            .into_iter()
            .filter(|row| !row.has_class(HIDE))
            .filter_map(row_id)
            .collect()
    }

    fn rows(&self) -> Vec<&Element> {
        self.root
            .by_class(DETAILS_PANE)
            .map(|pane| pane.all_by_class(TABLE_ITEM))
            .unwrap_or_default()
    }

    /// Empty the pane for the no-selection state
    ///
    /// The pane structure stays so later selections patch it in place.
    pub fn clear_details(&mut self) -> Result<()> {
        self.render_product_rows(&[])?;
        self.update_status_summary(&StatusSummary::default())?;
        self.clear_status_highlight()?;
        let pane = self.pane_mut()?;
        for class in [
            "js-contacts-Email",
            "js-contacts-phoneNumber",
            "js-contacts-address",
            "js-contacts-established",
            "js-contacts-floorArea",
        ] {
            if let Some(span) = pane.by_class_mut(class) {
                span.set_text("");
            }
        }
        pane.add_class(HIDE);
        Ok(())
    }

    /// Reveal a pane emptied by [`Surface::clear_details`]
    pub fn reveal_details(&mut self) -> Result<()> {
        self.pane_mut()?.remove_class(HIDE);
        Ok(())
    }

    /// Whether the pane exists but is emptied
    #[must_use]
    pub fn details_hidden(&self) -> bool {
        self.root
            .by_class(DETAILS_PANE)
            .is_some_and(|pane| pane.has_class(HIDE))
    }

    // ----- modals and forms -----

    /// Show a modal window
    pub fn open_modal(&mut self, modal: Modal) -> Result<()> {
        let window = self.require(modal.window_class())?;
        window.add_class(SHOW);
        window.remove_class(HIDE);
        Ok(())
    }

    /// Hide a modal window
    pub fn close_modal(&mut self, modal: Modal) -> Result<()> {
        let window = self.require(modal.window_class())?;
        window.add_class(HIDE);
        window.remove_class(SHOW);
        Ok(())
    }

    /// Whether the modal is shown
    #[must_use]
    pub fn modal_is_open(&self, modal: Modal) -> bool {
        self.root
            .by_class(modal.window_class())
            .is_some_and(|w| w.has_class(SHOW) && !w.has_class(HIDE))
    }

    /// Every shown modal
    #[must_use]
    pub fn open_modals(&self) -> Vec<Modal> {
        Modal::ALL
            .into_iter()
            .filter(|m| self.modal_is_open(*m))
            .collect()
    }

    /// Clear every input and textarea of the modal's form; selects go back
    /// to their first option
    pub fn reset_form(&mut self, modal: Modal) -> Result<()> {
        let Some(form_class) = modal.form_class() else {
            return Ok(());
        };
        self.require(form_class)?.for_each_mut(
            &|e| matches!(e.tag(), "input" | "textarea" | "select"),
            &mut |e| {
                let default = if e.tag() == "select" {
                    first_option_value(e)
                } else {
                    String::new()
                };
                e.set_attr("value", default);
            },
        );
        Ok(())
    }

    /// Mirror typed store form values into the inputs
    pub fn fill_store_form(&mut self, form: &StoreForm) -> Result<()> {
        self.set_input("modal-store-name-inp", &form.name)?;
        self.set_input(FormField::Email.input_class(), &form.email)?;
        self.set_input("modal-store-phoneNunber-inp", &form.phone_number)?;
        self.set_input("modal-store-address-inp", &form.address)?;
        self.set_input("modal-store-established-inp", &form.established)?;
        self.set_input(FormField::FloorArea.input_class(), &form.floor_area)
    }

    /// Mirror typed product form values into the inputs
    pub fn fill_product_form(&mut self, form: &ProductForm) -> Result<()> {
        self.set_input("modal-detail-name-inp", &form.name)?;
        self.set_input(FormField::Price.input_class(), &form.price)?;
        self.set_input("modal-detail-specs-inp", &form.specs)?;
        self.set_input(FormField::Rating.input_class(), &form.rating)?;
        self.set_input("modal-detail-supplierInfo-inp", &form.supplier_info)?;
        self.set_input("modal-detail-madePlace-inp", &form.made_in)?;
        self.set_input("modal-detail-companyName-inp", &form.production_company_name)?;
        self.set_input(FormField::Status.input_class(), &form.status)
    }

    fn set_input(&mut self, class: &'static str, value: &str) -> Result<()> {
        self.require(class)?.set_attr("value", value);
        Ok(())
    }

    /// Current value of an input, by class hook
    #[must_use]
    pub fn input_value(&self, class: &str) -> Option<&str> {
        self.root.by_class(class)?.get_attr("value")
    }

    /// Mark a field invalid (input and its wrapper)
    pub fn mark_invalid(&mut self, field: FormField) -> Result<()> {
        self.set_invalid(field, true)
    }

    /// Remove the invalid marker from a field
    pub fn clear_invalid(&mut self, field: FormField) -> Result<()> {
        self.set_invalid(field, false)
    }

    fn set_invalid(&mut self, field: FormField, invalid: bool) -> Result<()> {
        let class = field.input_class();
        let path = self
            .root
            .path_to(&|e| e.has_class(class))
            .ok_or(SurfaceError::MissingElement(class))?;

        let (input_path, wrapper_path) = (path.as_slice(), &path[..path.len().saturating_sub(1)]);
        for (path, marker) in [(input_path, WRONG_DATA), (wrapper_path, WRONG_INPUT)] {
            let element = self
                .root
                .at_path_mut(path)
                .ok_or(SurfaceError::MissingElement(class))?;
            if invalid {
                element.add_class(marker);
            } else {
                element.remove_class(marker);
            }
        }
        Ok(())
    }

    /// Fields currently carrying the invalid marker
    #[must_use]
    pub fn invalid_fields(&self) -> Vec<FormField> {
        FormField::ALL
            .into_iter()
            .filter(|field| {
                self.root
                    .by_class(field.input_class())
                    .is_some_and(|e| e.has_class(WRONG_DATA))
            })
            .collect()
    }

    // ----- search -----

    /// Set the search input text
    pub fn set_search_text(&mut self, text: &str) -> Result<()> {
        self.set_input(SEARCH_INPUT, text)
    }

    /// Current search input text
    #[must_use]
    pub fn search_text(&self) -> &str {
        self.input_value(SEARCH_INPUT).unwrap_or_default()
    }

    /// Serialize the document
    #[must_use]
    pub fn to_html(&self) -> String {
        crate::html::render(&self.root)
    }
}

fn row_id(row: &Element) -> Option<ProductId> {
    row.by_class(ROW_CROSS)?.get_attr("data-id")?.parse().ok()
}

fn first_option_value(select: &Element) -> String {
    select
        .child_nodes()
        .iter()
        .find(|c| c.tag() == "option")
        .and_then(|o| o.get_attr("value").or_else(|| o.text_content()))
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn store(id: u64, name: &str) -> Store {
        Store {
            id: StoreId(id),
            name: name.into(),
            address: format!("{id} Main St"),
            floor_area: 50.0,
            email: format!("s{id}@example.com"),
            phone_number: "555".into(),
            established: "2001".into(),
        }
    }

    fn product(id: u64, status: ProductStatus) -> Product {
        Product {
            id: ProductId(id),
            store_id: StoreId(1),
            name: format!("P{id}"),
            price: 1.0,
            specs: String::new(),
            supplier_info: String::new(),
            made_in: String::new(),
            production_company_name: String::new(),
            rating: 2,
            status,
        }
    }

    fn with_pane() -> Surface {
        let mut surface = Surface::new();
        surface.render_store_list(&[store(1, "A"), store(2, "B")]).unwrap();
        surface
            .construct_details_pane(
                &store(1, "A"),
                &[
                    product(10, ProductStatus::Ok),
                    product(11, ProductStatus::Storage),
                    product(12, ProductStatus::OutOfStock),
                ],
            )
            .unwrap();
        surface
    }

    #[test]
    fn active_marker_is_exclusive() {
        let mut surface = with_pane();
        assert!(surface.mark_active_store(StoreId(1)));
        assert!(surface.mark_active_store(StoreId(2)));
        assert_eq!(surface.active_store_id(), Some(StoreId(2)));
        assert_eq!(surface.active_marker_count(), 1);

        assert!(!surface.mark_active_store(StoreId(9)));
        assert_eq!(surface.active_marker_count(), 0);
    }

    #[test]
    fn patch_operations_need_a_pane() {
        let mut surface = Surface::new();
        assert!(!surface.details_pane_exists());
        assert_eq!(
            surface.render_product_rows(&[]),
            Err(SurfaceError::NoDetailsPane)
        );
        assert_eq!(
            surface.highlight_status(ProductStatus::Ok),
            Err(SurfaceError::NoDetailsPane)
        );
    }

    #[test]
    fn construct_replaces_placeholder() {
        let surface = with_pane();
        assert!(surface.details_pane_exists());
        assert!(surface.root().by_class(DEFAULT_PANE).is_none());
        assert_eq!(
            surface.row_statuses(),
            vec![
                (ProductId(10), ProductStatus::Ok),
                (ProductId(11), ProductStatus::Storage),
                (ProductId(12), ProductStatus::OutOfStock),
            ]
        );
        assert_eq!(
            surface.status_summary(),
            Some(StatusSummary {
                ok: 1,
                storage: 1,
                out_of_stock: 1
            })
        );
        assert_eq!(surface.contact_text("js-contacts-floorArea"), Some("50"));
    }

    #[test]
    fn show_rows_hides_without_removing() {
        let mut surface = with_pane();
        surface
            .show_rows(StatusFilter::Only(ProductStatus::Storage))
            .unwrap();
        assert_eq!(surface.visible_row_ids(), vec![ProductId(11)]);
        assert_eq!(surface.row_statuses().len(), 3);

        surface.show_rows(StatusFilter::All).unwrap();
        assert_eq!(surface.visible_row_ids().len(), 3);
    }

    #[test]
    fn highlight_is_exclusive() {
        let mut surface = with_pane();
        surface.highlight_status(ProductStatus::Ok).unwrap();
        surface.highlight_status(ProductStatus::OutOfStock).unwrap();
        assert_eq!(surface.highlighted_statuses(), vec![ProductStatus::OutOfStock]);

        surface.clear_status_highlight().unwrap();
        assert!(surface.highlighted_statuses().is_empty());
    }

    #[test]
    fn modal_toggles_show_and_hide() {
        let mut surface = Surface::new();
        surface.open_modal(Modal::CreateStore).unwrap();
        assert!(surface.modal_is_open(Modal::CreateStore));
        assert_eq!(surface.open_modals(), vec![Modal::CreateStore]);

        surface.close_modal(Modal::CreateStore).unwrap();
        let window = surface.root().by_class("modal-create-stores").unwrap();
        assert!(window.has_class(HIDE));
        assert!(!window.has_class(SHOW));
    }

    #[test]
    fn invalid_marker_reaches_wrapper() {
        let mut surface = Surface::new();
        surface.mark_invalid(FormField::Email).unwrap();
        assert_eq!(surface.invalid_fields(), vec![FormField::Email]);
        assert_eq!(surface.root().all_by_class(WRONG_INPUT).len(), 1);

        surface.clear_invalid(FormField::Email).unwrap();
        assert!(surface.invalid_fields().is_empty());
        assert!(surface.root().all_by_class(WRONG_INPUT).is_empty());
    }

    #[test]
    fn reset_clears_typed_values() {
        let mut surface = Surface::new();
        let form = StoreForm {
            name: "Shop".into(),
            floor_area: "12".into(),
            ..StoreForm::default()
        };
        surface.fill_store_form(&form).unwrap();
        assert_eq!(surface.input_value("modal-store-name-inp"), Some("Shop"));

        surface.reset_form(Modal::CreateStore).unwrap();
        assert_eq!(surface.input_value("modal-store-name-inp"), Some(""));
        assert_eq!(surface.input_value(FormField::FloorArea.input_class()), Some(""));
    }

    #[test]
    fn reset_returns_status_select_to_first_option() {
        let mut surface = Surface::new();
        let form = ProductForm {
            name: "Lamp".into(),
            status: ProductStatus::OutOfStock.as_str().into(),
            ..ProductForm::default()
        };
        surface.fill_product_form(&form).unwrap();
        assert_eq!(
            surface.input_value(FormField::Status.input_class()),
            Some("OUT_OF_STOCK")
        );

        surface.reset_form(Modal::CreateProduct).unwrap();
        assert_eq!(surface.input_value(FormField::Status.input_class()), Some("OK"));
        assert_eq!(surface.input_value("modal-detail-name-inp"), Some(""));
    }

    #[test]
    fn clear_details_keeps_structure() {
        let mut surface = with_pane();
        surface.highlight_status(ProductStatus::Ok).unwrap();
        surface.clear_details().unwrap();

        assert!(surface.details_pane_exists());
        assert!(surface.details_hidden());
        assert!(surface.row_statuses().is_empty());
        assert!(surface.highlighted_statuses().is_empty());
        assert_eq!(surface.status_summary(), Some(StatusSummary::default()));

        surface.reveal_details().unwrap();
        assert!(!surface.details_hidden());
    }
}
