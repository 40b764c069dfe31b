pub mod u501_touch_sale;
