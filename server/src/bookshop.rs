//! Books, customers and salespeople, read and written through diesel.

use crate::models::{BookRow, CustomerRow, NewBook, NewCustomer, NewSalesperson, SalespersonRow};
use crate::schema::{books, customers, salespersons};
use diesel::prelude::*;
use larder_core::{Book, BookQuery, Customer, Salesperson};

/// `%text%` for LIKE, with the wildcards in `text` matched literally.
fn contains_pattern(text: &str) -> String {
    let mut pattern = String::with_capacity(text.len() + 2);
    pattern.push('%');
    for c in text.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Books matching `query`, ordered by name.
pub fn list_books(conn: &mut SqliteConnection, query: &BookQuery) -> QueryResult<Vec<Book>> {
    let mut select = books::table.select(BookRow::as_select()).into_boxed();

    if let Some(text) = &query.text {
        let pattern = contains_pattern(text);
        select = select.filter(
            books::name
                .like(pattern.clone())
                .escape('\\')
                .or(books::author_name.like(pattern).escape('\\')),
        );
    }
    if let Some(genre) = query.genre {
        select = select.filter(books::genre.eq(genre.as_str()));
    }
    if let Some(book_type) = query.book_type {
        select = select.filter(books::book_type.eq(book_type.as_str()));
    }

    let rows: Vec<BookRow> = select
        .order((books::name.asc(), books::id.asc()))
        .load(conn)?;
    Ok(rows.into_iter().map(BookRow::into_book).collect())
}

pub fn create_book(conn: &mut SqliteConnection, book: &NewBook) -> QueryResult<Book> {
    let row: BookRow = diesel::insert_into(books::table)
        .values(book)
        .returning(BookRow::as_returning())
        .get_result(conn)?;
    Ok(row.into_book())
}

/// Customers whose name contains `text`, ordered by name.
pub fn list_customers(
    conn: &mut SqliteConnection,
    text: Option<&str>,
) -> QueryResult<Vec<Customer>> {
    let mut select = customers::table.select(CustomerRow::as_select()).into_boxed();
    if let Some(text) = text {
        select = select.filter(customers::name.like(contains_pattern(text)).escape('\\'));
    }
    let rows: Vec<CustomerRow> = select
        .order((customers::name.asc(), customers::id.asc()))
        .load(conn)?;
    Ok(rows.into_iter().map(Customer::from).collect())
}

pub fn create_customer(
    conn: &mut SqliteConnection,
    customer: &NewCustomer,
) -> QueryResult<Customer> {
    diesel::insert_into(customers::table)
        .values(customer)
        .returning(CustomerRow::as_returning())
        .get_result(conn)
        .map(Customer::from)
}

/// Salespeople whose username or name contains `text`, ordered by username.
pub fn list_salespersons(
    conn: &mut SqliteConnection,
    text: Option<&str>,
) -> QueryResult<Vec<Salesperson>> {
    let mut select = salespersons::table
        .select(SalespersonRow::as_select())
        .into_boxed();
    if let Some(text) = text {
        let pattern = contains_pattern(text);
        select = select.filter(
            salespersons::username
                .like(pattern.clone())
                .escape('\\')
                .or(salespersons::name.like(pattern).escape('\\')),
        );
    }
    let rows: Vec<SalespersonRow> = select.order(salespersons::username.asc()).load(conn)?;
    Ok(rows.into_iter().map(Salesperson::from).collect())
}

/// Fails with a unique violation when the username is taken.
pub fn create_salesperson(
    conn: &mut SqliteConnection,
    person: &NewSalesperson,
) -> QueryResult<Salesperson> {
    diesel::insert_into(salespersons::table)
        .values(person)
        .returning(SalespersonRow::as_returning())
        .get_result(conn)
        .map(Salesperson::from)
}
