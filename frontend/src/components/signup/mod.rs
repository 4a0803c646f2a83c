pub mod academic;
