//! An in-memory inventory and order manager built on [`OrderedIndex`].
//!
//! Products, customers, and orders each live in their own index keyed by id;
//! reviews are kept in one store-wide [`OrderedSequence`]. Reporting queries
//! take a snapshot and run it through the [`ranking`](crate::ranking) routines.

use alloc::string::String;

use tracing::{debug, info, warn};

use crate::ranking;
use crate::{OrderedIndex, OrderedSequence};

mod config;
mod error;
mod records;

pub use config::StoreConfig;
pub use error::StoreError;
pub use records::{CANCELLED, Customer, Order, Product, Review};

/// The inventory and order manager.
///
/// # Examples
///
/// ```
/// use inventory_tree::{Customer, Order, Product, Store};
///
/// let mut store = Store::new();
/// store.add_product(Product::new(1, "Kettle", 25.0, 10));
/// store.add_product(Product::new(2, "Toaster", 40.0, 0));
/// store.register_customer(Customer::new(100, "Dana", "dana@example.com"));
///
/// let total = store.place_order(Order::new(500, 100, [1, 2], "2024-03-01", "Pending"))?;
/// assert_eq!(total, 65.0);
///
/// store.add_review(1, 100, 5, "Boils fast")?;
/// assert_eq!(store.average_rating(1), 5.0);
/// assert_eq!(store.out_of_stock_products().len(), 1);
/// # Ok::<(), inventory_tree::StoreError>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct Store {
    config: StoreConfig,
    products: OrderedIndex<Product>,
    customers: OrderedIndex<Customer>,
    orders: OrderedIndex<Order>,
    reviews: OrderedSequence<Review>,
    last_review_id: u32,
}

impl Store {
    /// Creates an empty store with the default [`StoreConfig`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty store with the given configuration.
    #[must_use]
    pub fn with_config(config: StoreConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    // ─── Products ────────────────────────────────────────────────────────────

    /// Adds `product`, replacing any product with the same id.
    pub fn add_product(&mut self, product: Product) {
        info!(product_id = product.id(), name = product.name(), "product added");
        self.products.upsert(product.id(), product);
    }

    /// Removes and returns the product with `id`, along with its reviews.
    ///
    /// A product later added under the same id starts with no reviews.
    ///
    /// # Errors
    ///
    /// [`StoreError::ProductNotFound`] if no such product exists.
    pub fn remove_product(&mut self, id: i32) -> Result<Product, StoreError> {
        let Some(product) = self.products.remove(id) else {
            warn!(product_id = id, "remove of unknown product");
            return Err(StoreError::ProductNotFound(id));
        };
        let before = self.reviews.len();
        self.reviews.retain(|review| review.product_id() != id);
        info!(product_id = id, reviews_dropped = before - self.reviews.len(), "product removed");
        Ok(product)
    }

    /// Replaces the name, price, and stock of the product with `id`.
    ///
    /// # Errors
    ///
    /// [`StoreError::ProductNotFound`] if no such product exists.
    pub fn update_product(&mut self, id: i32, name: impl Into<String>, price: f64, stock: u32) -> Result<(), StoreError> {
        let Some(product) = self.products.find_mut(id) else {
            warn!(product_id = id, "update of unknown product");
            return Err(StoreError::ProductNotFound(id));
        };
        product.set_name(name);
        product.set_price(price);
        product.set_stock(stock);
        info!(product_id = id, "product updated");
        Ok(())
    }

    #[must_use]
    pub fn product(&self, id: i32) -> Option<&Product> {
        self.products.find(id)
    }

    /// All products in id order.
    #[must_use]
    pub fn products(&self) -> OrderedSequence<Product> {
        self.products.snapshot()
    }

    /// Products with zero stock, in id order.
    #[must_use]
    pub fn out_of_stock_products(&self) -> OrderedSequence<Product> {
        self.products().into_iter().filter(Product::is_out_of_stock).collect()
    }

    /// Products priced within `min..=max`, in id order.
    #[must_use]
    pub fn products_in_price_range(&self, min: f64, max: f64) -> OrderedSequence<Product> {
        debug!(min, max, "price range query");
        ranking::filter_range(self.products(), min, max, Product::price)
    }

    // ─── Customers ───────────────────────────────────────────────────────────

    /// Registers `customer`, replacing any customer with the same id.
    pub fn register_customer(&mut self, customer: Customer) {
        info!(customer_id = customer.id(), name = customer.name(), "customer registered");
        self.customers.upsert(customer.id(), customer);
    }

    #[must_use]
    pub fn customer(&self, id: i32) -> Option<&Customer> {
        self.customers.find(id)
    }

    /// All customers in id order.
    #[must_use]
    pub fn customers(&self) -> OrderedSequence<Customer> {
        self.customers.snapshot()
    }

    /// All customers ordered by name, ignoring case. Equal names keep id order.
    #[must_use]
    pub fn customers_sorted_by_name(&self) -> OrderedSequence<Customer> {
        ranking::sort_ascending_by_key(self.customers(), |customer| customer.name().to_lowercase())
    }

    // ─── Orders ──────────────────────────────────────────────────────────────

    /// Prices and records `order`, and appends it to the customer's history.
    ///
    /// The total is the sum of the current prices of the listed products;
    /// ids with no matching product contribute nothing. Returns the total.
    ///
    /// # Errors
    ///
    /// [`StoreError::CustomerNotFound`] if the ordering customer does not exist.
    /// Nothing is recorded in that case.
    pub fn place_order(&mut self, mut order: Order) -> Result<f64, StoreError> {
        let customer_id = order.customer_id();
        if !self.customers.contains_key(customer_id) {
            warn!(order_id = order.id(), customer_id, "order for unknown customer");
            return Err(StoreError::CustomerNotFound(customer_id));
        }

        let total: f64 = order
            .product_ids()
            .iter()
            .filter_map(|&product_id| self.products.find(product_id))
            .map(Product::price)
            .sum();
        order.set_total_price(total);

        let order_id = order.id();
        self.orders.upsert(order_id, order);
        if let Some(customer) = self.customers.find_mut(customer_id) {
            customer.record_order(order_id);
        }
        info!(order_id, customer_id, total, "order placed");
        Ok(total)
    }

    /// Marks the order with `id` as [`CANCELLED`].
    ///
    /// # Errors
    ///
    /// [`StoreError::OrderNotFound`] if no such order exists.
    pub fn cancel_order(&mut self, id: i32) -> Result<(), StoreError> {
        self.update_order_status(id, CANCELLED)
    }

    /// Sets the free-text status of the order with `id`.
    ///
    /// # Errors
    ///
    /// [`StoreError::OrderNotFound`] if no such order exists.
    pub fn update_order_status(&mut self, id: i32, status: impl Into<String>) -> Result<(), StoreError> {
        let Some(order) = self.orders.find_mut(id) else {
            warn!(order_id = id, "status change of unknown order");
            return Err(StoreError::OrderNotFound(id));
        };
        order.set_status(status);
        info!(order_id = id, status = order.status(), "order status changed");
        Ok(())
    }

    #[must_use]
    pub fn order(&self, id: i32) -> Option<&Order> {
        self.orders.find(id)
    }

    /// All orders in id order.
    #[must_use]
    pub fn orders(&self) -> OrderedSequence<Order> {
        self.orders.snapshot()
    }

    /// Orders dated within `start..=end`, in id order.
    ///
    /// Dates are compared as strings, so all of them must be zero-padded
    /// `YYYY-MM-DD`.
    #[must_use]
    pub fn orders_between_dates(&self, start: &str, end: &str) -> OrderedSequence<Order> {
        debug!(start, end, "order date range query");
        ranking::dates_between(self.orders(), start, end, Order::order_date)
    }

    // ─── Reviews ─────────────────────────────────────────────────────────────

    fn check_rating(&self, rating: u8) -> Result<(), StoreError> {
        if self.config.accepts_rating(rating) {
            return Ok(());
        }
        warn!(rating, "rating rejected");
        Err(StoreError::InvalidRating {
            rating,
            min: self.config.min_rating,
            max: self.config.max_rating,
        })
    }

    /// Records a review of `product_id` and returns its id.
    ///
    /// Review ids count up from 1 in the order reviews are added and are never
    /// reused, even after the reviews of a removed product are dropped.
    ///
    /// # Errors
    ///
    /// - [`StoreError::InvalidRating`] if `rating` is outside the configured range.
    /// - [`StoreError::ProductNotFound`] if the product does not exist.
    pub fn add_review(
        &mut self,
        product_id: i32,
        customer_id: i32,
        rating: u8,
        comment: impl Into<String>,
    ) -> Result<u32, StoreError> {
        self.check_rating(rating)?;
        if !self.products.contains_key(product_id) {
            warn!(product_id, "review of unknown product");
            return Err(StoreError::ProductNotFound(product_id));
        }

        let id = self.last_review_id + 1;
        self.last_review_id = id;
        self.reviews.push(Review::new(id, product_id, customer_id, rating, comment.into()));
        info!(review_id = id, product_id, customer_id, rating, "review added");
        Ok(id)
    }

    /// Replaces the rating and comment of the review with `review_id`.
    ///
    /// # Errors
    ///
    /// - [`StoreError::InvalidRating`] if `rating` is outside the configured range.
    /// - [`StoreError::ReviewNotFound`] if no such review exists.
    pub fn edit_review(&mut self, review_id: u32, rating: u8, comment: impl Into<String>) -> Result<(), StoreError> {
        self.check_rating(rating)?;
        let Some(review) = self.reviews.iter_mut().find(|review| review.id() == review_id) else {
            warn!(review_id, "edit of unknown review");
            return Err(StoreError::ReviewNotFound(review_id));
        };
        review.revise(rating, comment.into());
        info!(review_id, rating, "review updated");
        Ok(())
    }

    /// Every review, in the order they were added.
    #[must_use]
    pub fn reviews(&self) -> &OrderedSequence<Review> {
        &self.reviews
    }

    /// Reviews written by `customer_id`, in the order they were added.
    #[must_use]
    pub fn reviews_by_customer(&self, customer_id: i32) -> OrderedSequence<Review> {
        self.reviews
            .iter()
            .filter(|review| review.customer_id() == customer_id)
            .cloned()
            .collect()
    }

    /// Reviews of `product_id`, in the order they were added.
    #[must_use]
    pub fn reviews_of_product(&self, product_id: i32) -> OrderedSequence<Review> {
        self.reviews
            .iter()
            .filter(|review| review.product_id() == product_id)
            .cloned()
            .collect()
    }

    /// Mean rating of `product_id`, or 0.0 if it has no reviews.
    #[must_use]
    pub fn average_rating(&self, product_id: i32) -> f64 {
        let (sum, count) = self
            .reviews
            .iter()
            .filter(|review| review.product_id() == product_id)
            .fold((0.0, 0.0), |(sum, count), review| (sum + f64::from(review.rating()), count + 1.0));
        if count == 0.0 { 0.0 } else { sum / count }
    }

    // ─── Reports ─────────────────────────────────────────────────────────────

    /// Customers who reviewed `product_id`, highest rating first.
    ///
    /// Reviews with equal ratings keep the order they were added in. A customer
    /// appears once per review; reviewers who are not registered are skipped.
    /// An unknown product yields an empty sequence.
    #[must_use]
    pub fn customers_who_reviewed_product(&self, product_id: i32) -> OrderedSequence<Customer> {
        if !self.products.contains_key(product_id) {
            return OrderedSequence::new();
        }

        let reviews = self.reviews_of_product(product_id);
        let count = reviews.len();
        ranking::top_k(reviews, count, Review::rating)
            .iter()
            .filter_map(|review| self.customers.find(review.customer_id()).cloned())
            .collect()
    }

    /// The [`top_rated_count`](StoreConfig::top_rated_count) reviewed products
    /// with the highest average rating, best first. Ties go to the lower id.
    #[must_use]
    pub fn top_rated_products(&self) -> OrderedSequence<Product> {
        let rated: OrderedSequence<Product> = self
            .products()
            .into_iter()
            .filter(|product| self.reviews.iter().any(|review| review.product_id() == product.id()))
            .collect();
        ranking::top_k(rated, self.config.top_rated_count, |product| self.average_rating(product.id()))
    }

    /// Products both customers reviewed whose average rating exceeds
    /// [`high_rating_threshold`](StoreConfig::high_rating_threshold).
    ///
    /// Each product appears once, in the order the first customer reviewed
    /// them.
    #[must_use]
    pub fn common_high_rated_products(&self, first_customer: i32, second_customer: i32) -> OrderedSequence<Product> {
        let threshold = self.config.high_rating_threshold;
        ranking::intersect_by_derived_key(
            &self.reviews_by_customer(first_customer),
            &self.reviews_by_customer(second_customer),
            Review::product_id,
            Review::product_id,
            |review, _| self.products.find(review.product_id()).cloned(),
            |product: &Product| self.average_rating(product.id()) > threshold,
            Product::id,
        )
    }
}
