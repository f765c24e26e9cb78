pub mod titler_store;
