mod ancestors;
mod members;
mod records;
