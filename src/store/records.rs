use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

/// Status an order is given by [`Store::cancel_order`](crate::Store::cancel_order).
pub const CANCELLED: &str = "Cancelled";

/// A product in the catalogue, keyed by `id`.
#[derive(Clone, Debug, PartialEq)]
pub struct Product {
    id: i32,
    name: String,
    price: f64,
    stock: u32,
}

impl Product {
    pub fn new(id: i32, name: impl Into<String>, price: f64, stock: u32) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            stock,
        }
    }

    #[must_use]
    pub fn id(&self) -> i32 {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn price(&self) -> f64 {
        self.price
    }

    #[must_use]
    pub fn stock(&self) -> u32 {
        self.stock
    }

    #[must_use]
    pub fn is_out_of_stock(&self) -> bool {
        self.stock == 0
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_price(&mut self, price: f64) {
        self.price = price;
    }

    pub fn set_stock(&mut self, stock: u32) {
        self.stock = stock;
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Product{{productId={}, name='{}', price={:.2}, stock={}}}",
            self.id, self.name, self.price, self.stock
        )
    }
}

/// A registered customer and the ids of the orders they placed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Customer {
    id: i32,
    name: String,
    email: String,
    order_ids: Vec<i32>,
}

impl Customer {
    pub fn new(id: i32, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            order_ids: Vec::new(),
        }
    }

    #[must_use]
    pub fn id(&self) -> i32 {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Ids of this customer's orders, in the order they were placed.
    #[must_use]
    pub fn order_ids(&self) -> &[i32] {
        &self.order_ids
    }

    pub(crate) fn record_order(&mut self, order_id: i32) {
        self.order_ids.push(order_id);
    }
}

impl fmt::Display for Customer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Customer{{customerId={}, name='{}', email='{}', totalOrders={}}}",
            self.id,
            self.name,
            self.email,
            self.order_ids.len()
        )
    }
}

/// An order placed by a customer.
///
/// `order_date` is a zero-padded `YYYY-MM-DD` string; date range queries
/// compare it as text.
#[derive(Clone, Debug, PartialEq)]
pub struct Order {
    id: i32,
    customer_id: i32,
    product_ids: Vec<i32>,
    total_price: f64,
    order_date: String,
    status: String,
}

impl Order {
    /// Creates an order with a zero total; [`Store::place_order`] prices it.
    ///
    /// [`Store::place_order`]: crate::Store::place_order
    pub fn new(
        id: i32,
        customer_id: i32,
        product_ids: impl IntoIterator<Item = i32>,
        order_date: impl Into<String>,
        status: impl Into<String>,
    ) -> Self {
        Self {
            id,
            customer_id,
            product_ids: product_ids.into_iter().collect(),
            total_price: 0.0,
            order_date: order_date.into(),
            status: status.into(),
        }
    }

    #[must_use]
    pub fn id(&self) -> i32 {
        self.id
    }

    #[must_use]
    pub fn customer_id(&self) -> i32 {
        self.customer_id
    }

    #[must_use]
    pub fn product_ids(&self) -> &[i32] {
        &self.product_ids
    }

    #[must_use]
    pub fn total_price(&self) -> f64 {
        self.total_price
    }

    #[must_use]
    pub fn order_date(&self) -> &str {
        &self.order_date
    }

    #[must_use]
    pub fn status(&self) -> &str {
        &self.status
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.status == CANCELLED
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
    }

    pub(crate) fn set_total_price(&mut self, total_price: f64) {
        self.total_price = total_price;
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Order{{orderId={}, customerId={}, totalPrice={:.2}, orderDate='{}', status='{}'}}",
            self.id, self.customer_id, self.total_price, self.order_date, self.status
        )
    }
}

/// A customer's rating of a product.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Review {
    id: u32,
    product_id: i32,
    customer_id: i32,
    rating: u8,
    comment: String,
}

impl Review {
    pub(crate) fn new(id: u32, product_id: i32, customer_id: i32, rating: u8, comment: String) -> Self {
        Self {
            id,
            product_id,
            customer_id,
            rating,
            comment,
        }
    }

    #[must_use]
    pub fn id(&self) -> u32 {
        self.id
    }

    #[must_use]
    pub fn product_id(&self) -> i32 {
        self.product_id
    }

    #[must_use]
    pub fn customer_id(&self) -> i32 {
        self.customer_id
    }

    #[must_use]
    pub fn rating(&self) -> u8 {
        self.rating
    }

    #[must_use]
    pub fn comment(&self) -> &str {
        &self.comment
    }

    // Ratings are validated against the store's config before they get here.
    pub(crate) fn revise(&mut self, rating: u8, comment: String) {
        self.rating = rating;
        self.comment = comment;
    }
}

impl fmt::Display for Review {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Review{{reviewId={}, productId={}, customerId={}, rating={}, comment='{}'}}",
            self.id, self.product_id, self.customer_id, self.rating, self.comment
        )
    }
}
