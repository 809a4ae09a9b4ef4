mod leads;
mod packages;
mod partners;
