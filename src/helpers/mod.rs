pub mod reducers;
