pub mod pricing_engine;
