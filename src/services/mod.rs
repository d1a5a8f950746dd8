pub mod jj;
