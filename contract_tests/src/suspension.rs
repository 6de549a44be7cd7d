//! Suspension contract: the suspended stack is exactly LIFO and the jobs
//! listing is stable in declaration order.
