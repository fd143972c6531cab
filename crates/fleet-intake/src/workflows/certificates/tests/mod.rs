mod classification;
mod common;
mod valid_date;
