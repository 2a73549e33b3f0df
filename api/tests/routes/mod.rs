mod health_test;
mod reports_test;
