pub mod table_view;
